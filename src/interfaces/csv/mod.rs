pub mod offer_writer;
