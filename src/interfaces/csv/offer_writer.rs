use crate::domain::offer::LenderOffer;
use crate::error::Result;
use std::io::Write;

/// Writes displayed offer rows as a delimited export.
///
/// Wraps `csv::Writer`; rates are rendered with two fractional digits, same
/// as the on-screen table.
pub struct OfferWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OfferWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_offers(&mut self, offers: &[LenderOffer]) -> Result<()> {
        self.writer
            .write_record(["banco", "tipo_operacao", "taxa_aplicavel", "observacoes"])?;
        for offer in offers {
            self.writer.write_record([
                offer.lender.as_str(),
                offer.operation_type.as_str(),
                &offer.rate_display(),
                offer.notes.as_str(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
