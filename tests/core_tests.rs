use chrono::NaiveDate;
use fatturapa::core::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn builder_assembles_full_document() {
    let invoice = InvoiceBuilder::new("2024/0042", date(2024, 3, 1))
        .document_type(DocumentType::FeeNote)
        .currency("EUR")
        .total_amount(dec!(1220.00))
        .issuer(
            IssuerBuilder::new(
                PartyIdentity::person("Anna", "Bianchi"),
                AddressBuilder::new("Via Garibaldi 10", "10121", "Torino", "IT")
                    .province("TO")
                    .build(),
            )
            .vat_number("01234567897")
            .fiscal_regime(FiscalRegime::FlatRate)
            .build(),
        )
        .recipient(
            RecipientBuilder::new(
                PartyIdentity::company("Studio Legale Associato"),
                AddressBuilder::new("Piazza Dante 1", "16121", "Genova", "IT")
                    .province("GE")
                    .build(),
                RecipientRouting::Channel("XYZ9876".into()),
            )
            .vat_number("06363391001")
            .build(),
        )
        .add_line(
            LineItemBuilder::new(1, "Parcella professionale", dec!(1000.00), dec!(1000.00))
                .vat_rate(dec!(22))
                .build(),
        )
        .add_vat_summary(VatSummary::new(dec!(22), dec!(1000.00), dec!(220.00)))
        .payment(PaymentData {
            terms: PaymentTerms::Installments,
            details: vec![
                PaymentDetail {
                    method: PaymentMethod::BankTransfer,
                    due_date: Some(date(2024, 4, 30)),
                    amount: dec!(610.00),
                    iban: Some("IT60X0542811101000000123456".into()),
                },
                PaymentDetail {
                    method: PaymentMethod::Riba,
                    due_date: Some(date(2024, 5, 31)),
                    amount: dec!(610.00),
                    iban: None,
                },
            ],
        })
        .build()
        .unwrap();

    assert_eq!(invoice.document_type.code(), "TD06");
    assert_eq!(invoice.issuer.fiscal_regime, Some(FiscalRegime::FlatRate));
    assert_eq!(invoice.payment.as_ref().unwrap().details.len(), 2);
    assert!(invoice.issuer.address.is_domestic());
}

#[test]
fn checksum_accepts_and_rejects() {
    // Appending the computed check digit always yields a valid number.
    let base = "0636339100";
    let check = vat_check_digit(base).unwrap();
    let full = format!("{base}{check}");
    assert!(is_valid_vat_number(&full));

    // Any other trailing digit is invalid.
    for wrong in 0..10u32 {
        if wrong == check {
            continue;
        }
        assert!(!is_valid_vat_number(&format!("{base}{wrong}")));
    }
}

#[test]
fn identity_forms_are_exclusive_by_construction() {
    // The sum type makes a half-filled identity unrepresentable; the two
    // forms carry exactly the fields their variant needs.
    let company = PartyIdentity::company("ACME S.r.l.");
    let person = PartyIdentity::person("Mario", "Rossi");
    assert_ne!(company, person);
    match person {
        PartyIdentity::Person {
            first_name,
            last_name,
        } => {
            assert_eq!(first_name, "Mario");
            assert_eq!(last_name, "Rossi");
        }
        PartyIdentity::Company { .. } => panic!("expected a person"),
    }
}

#[test]
fn iban_and_province_tables_agree_with_registry() {
    assert!(validate_iban("IT60X0542811101000000123456").is_ok());
    assert!(validate_iban("IT60X054281110100000012345").is_err());
    assert!(is_known_province_code("TO"));
    assert!(!is_known_province_code("ZZ"));
}
