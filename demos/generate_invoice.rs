use chrono::NaiveDate;
use fatturapa::core::*;
use fatturapa::sdi;
use rust_decimal_macros::dec;

fn main() {
    // Build an invoice for a private-sector recipient
    let invoice = InvoiceBuilder::new("42/A", NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        .issuer(
            IssuerBuilder::new(
                PartyIdentity::company("ACME S.r.l."),
                AddressBuilder::new("Via Roma 1", "00100", "Roma", "IT")
                    .province("RM")
                    .build(),
            )
            .vat_number("06363391001")
            .fiscal_regime(FiscalRegime::Ordinary)
            .build(),
        )
        .recipient(
            RecipientBuilder::new(
                PartyIdentity::company("Cliente S.p.A."),
                AddressBuilder::new("Corso Milano 2", "20121", "Milano", "IT")
                    .province("MI")
                    .build(),
                RecipientRouting::Channel("ABC1234".into()),
            )
            .vat_number("01234567897")
            .build(),
        )
        .add_line(
            LineItemBuilder::new(1, "Consulenza informatica", dec!(100.00), dec!(100.00))
                .quantity(dec!(1))
                .unit("ore")
                .build(),
        )
        .add_vat_summary(
            VatSummary::new(dec!(22), dec!(100.00), dec!(22.00)).liability(VatLiability::Immediate),
        )
        .payment(PaymentData {
            terms: PaymentTerms::FullPayment,
            details: vec![PaymentDetail {
                method: PaymentMethod::BankTransfer,
                due_date: NaiveDate::from_ymd_opt(2024, 4, 30),
                amount: dec!(122.00),
                iban: Some("IT60X0542811101000000123456".into()),
            }],
        })
        .build()
        .expect("invoice should assemble");

    match sdi::generate(&invoice, "00001") {
        Ok(generated) => {
            println!("File name: {}", generated.file_name);
            println!("{}", generated.xml);
        }
        Err(FatturaError::Preflight(errors)) => {
            println!("Pre-flight failed with {} errors:", errors.len());
            for e in &errors {
                println!("  {e}");
            }
        }
        Err(e) => println!("Generation failed: {e}"),
    }
}
