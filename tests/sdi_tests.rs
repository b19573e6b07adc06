#![cfg(feature = "sdi")]

use chrono::NaiveDate;
use fatturapa::core::*;
use fatturapa::sdi;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn issuer() -> Issuer {
    IssuerBuilder::new(
        PartyIdentity::company("ACME S.r.l."),
        AddressBuilder::new("Via Roma 1", "00100", "Roma", "IT")
            .province("RM")
            .build(),
    )
    .vat_number("06363391001")
    .fiscal_code("06363391001")
    .fiscal_regime(FiscalRegime::Ordinary)
    .build()
}

fn recipient() -> Recipient {
    RecipientBuilder::new(
        PartyIdentity::company("Cliente S.p.A."),
        AddressBuilder::new("Corso Milano 2", "20121", "Milano", "IT")
            .province("MI")
            .build(),
        RecipientRouting::Channel("ABC1234".into()),
    )
    .vat_number("01234567897")
    .build()
}

/// One line at 22% VAT with its matching summary row.
fn invoice() -> InvoiceDocument {
    InvoiceBuilder::new("42/A", date(2024, 3, 1))
        .issuer(issuer())
        .recipient(recipient())
        .add_line(
            LineItemBuilder::new(1, "Consulenza informatica", dec!(100.00), dec!(100.00))
                .quantity(dec!(1))
                .unit("ore")
                .build(),
        )
        .add_vat_summary(
            VatSummary::new(dec!(22), dec!(100.00), dec!(22.00)).liability(VatLiability::Immediate),
        )
        .build()
        .unwrap()
}

// ---------------------------------------------------------------------------
// End-to-end scenario
// ---------------------------------------------------------------------------

#[test]
fn end_to_end_private_profile() {
    let generated = sdi::generate(&invoice(), "00001").unwrap();

    // (b) private profile attribute
    assert!(generated.xml.contains("versione=\"FPR12\""));
    assert!(!generated.xml.contains("FPA12"));

    // (c) every validator layer passes
    let report = sdi::validate(&generated.xml);
    assert!(report.is_valid(), "unexpected errors: {:?}", report.errors);
}

#[test]
fn round_trip_with_all_optional_sections() {
    let mut document = invoice();
    document.total_amount = Some(dec!(122.00));
    document.stamp_duty = Some(StampDuty { amount: dec!(2.00) });
    document.withholding = Some(WithholdingTax {
        kind: WithholdingType::NaturalPersons,
        amount: dec!(20.00),
        rate: dec!(20),
        payment_reason: "A".into(),
    });
    document.social_security.push(SocialSecurityContribution {
        fund: PensionFund::Accountants,
        rate: dec!(4),
        amount: dec!(4.00),
        taxable_amount: Some(dec!(100.00)),
        vat_rate: dec!(22),
        nature: None,
    });
    document.related_documents.push(RelatedDocument {
        number: "DDT-99".into(),
        date: Some(date(2024, 2, 28)),
        line_refs: vec![1],
    });
    document.attachments.push(Attachment {
        name: "dettaglio.pdf".into(),
        format: Some("PDF".into()),
        description: Some("Dettaglio ore".into()),
        data: "JVBERi0xLjQ=".into(),
    });
    document.payment = Some(PaymentData {
        terms: PaymentTerms::FullPayment,
        details: vec![PaymentDetail {
            method: PaymentMethod::BankTransfer,
            due_date: Some(date(2024, 4, 30)),
            amount: dec!(122.00),
            iban: Some("IT60X0542811101000000123456".into()),
        }],
    });

    let generated = sdi::generate(&document, "00002").unwrap();
    let report = sdi::validate(&generated.xml);
    assert!(report.is_valid(), "unexpected errors: {:?}", report.errors);
}

#[test]
fn round_trip_pa_profile() {
    let mut document = invoice();
    document.recipient.routing = RecipientRouting::PublicAdministration("UFE25P".into());

    let generated = sdi::generate(&document, "00003").unwrap();
    assert!(generated.xml.contains("versione=\"FPA12\""));
    assert!(sdi::quick_validate(&generated.xml));
}

#[test]
fn round_trip_pec_and_foreign_routing() {
    let mut document = invoice();
    document.recipient.routing = RecipientRouting::CertifiedEmail("cliente@pec.example.it".into());
    let generated = sdi::generate(&document, "00004").unwrap();
    assert!(sdi::quick_validate(&generated.xml));

    let mut document = invoice();
    document.recipient.routing = RecipientRouting::Foreign;
    document.recipient.address = AddressBuilder::new("Hauptstr. 5", "10115", "Berlin", "DE").build();
    let generated = sdi::generate(&document, "00005").unwrap();
    assert!(sdi::quick_validate(&generated.xml));
}

#[test]
fn round_trip_zero_rate_line_with_nature() {
    let document = InvoiceBuilder::new("43/A", date(2024, 3, 2))
        .issuer(issuer())
        .recipient(recipient())
        .add_line(
            LineItemBuilder::new(1, "Formazione esente", dec!(200.00), dec!(200.00))
                .vat_rate(dec!(0))
                .nature(NatureCode::Exempt)
                .build(),
        )
        .add_vat_summary(
            VatSummary::new(dec!(0), dec!(200.00), dec!(0)).nature(NatureCode::Exempt),
        )
        .build()
        .unwrap();

    let generated = sdi::generate(&document, "00006").unwrap();
    let report = sdi::validate(&generated.xml);
    assert!(report.is_valid(), "unexpected errors: {:?}", report.errors);
}

#[test]
fn round_trip_natural_person_recipient() {
    let mut document = invoice();
    document.recipient = RecipientBuilder::new(
        PartyIdentity::person("Mario", "Rossi"),
        AddressBuilder::new("Via Verdi 3", "50122", "Firenze", "IT")
            .province("FI")
            .build(),
        RecipientRouting::CertifiedEmail("mario.rossi@pec.example.it".into()),
    )
    .fiscal_code("RSSMRA80A01H501U")
    .build();

    let generated = sdi::generate(&document, "00007").unwrap();
    assert!(generated.xml.contains("<Nome>Mario</Nome>"));
    assert!(generated.xml.contains("<Cognome>Rossi</Cognome>"));
    assert!(sdi::quick_validate(&generated.xml));
}

// ---------------------------------------------------------------------------
// Generator contract
// ---------------------------------------------------------------------------

#[test]
fn file_name_is_deterministic() {
    assert_eq!(
        sdi::generate_file_name("12345678901", "00001"),
        "IT12345678901_00001.xml"
    );
    assert_eq!(
        sdi::generate_file_name("123", "00001"),
        "IT00000000123_00001.xml"
    );
    let generated = sdi::generate(&invoice(), "00001").unwrap();
    assert_eq!(generated.file_name, "IT06363391001_00001.xml");
}

#[test]
fn preflight_failure_produces_no_document() {
    let mut document = invoice();
    document.lines.clear();
    document.number = " ".into();

    let err = sdi::generate(&document, "00001").unwrap_err();
    let FatturaError::Preflight(errors) = err else {
        panic!("expected pre-flight error");
    };
    assert_eq!(errors.len(), 2);
}

#[test]
fn escaped_description_survives_validation() {
    let mut document = invoice();
    document.lines[0].description = "\"A\" & <B>".into();

    let generated = sdi::generate(&document, "00001").unwrap();
    assert!(generated.xml.contains("&quot;A&quot; &amp; &lt;B&gt;"));
    // The escaped form is content, not structure — the document stays valid.
    assert!(sdi::quick_validate(&generated.xml));

    // Regenerating from the same value yields the same escaped form.
    let again = sdi::generate(&document, "00001").unwrap();
    assert_eq!(generated.xml, again.xml);
}

// ---------------------------------------------------------------------------
// Validator on hand-crafted documents
// ---------------------------------------------------------------------------

/// Generate, then corrupt via text replacement — keeps fixtures honest.
fn generated_xml() -> String {
    sdi::generate(&invoice(), "00001").unwrap().xml
}

#[test]
fn duplicate_line_numbers_rejected() {
    let mut document = invoice();
    document.lines.push(
        LineItemBuilder::new(1, "Seconda riga", dec!(50.00), dec!(50.00)).build(),
    );

    let generated = sdi::generate(&document, "00001").unwrap();
    let report = sdi::validate(&generated.xml);
    assert!(!report.is_valid());
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.message.contains("duplicate") && e.message.contains('1')),
        "expected a duplicate-line error, got: {:?}",
        report.errors
    );
}

#[test]
fn zero_rate_without_nature_rejected() {
    let mut document = invoice();
    document.lines[0].vat_rate = dec!(0);
    document.lines[0].nature = None;
    document.vat_summaries[0] = VatSummary::new(dec!(0), dec!(100.00), dec!(0));

    let generated = sdi::generate(&document, "00001").unwrap();
    let report = sdi::validate(&generated.xml);
    assert!(!report.is_valid());
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.path.contains("Natura") && e.message.contains("nature code")),
        "expected nature-code errors, got: {:?}",
        report.errors
    );

    // Supplying a registered nature code clears that check.
    let mut document = invoice();
    document.lines[0].vat_rate = dec!(0);
    document.lines[0].nature = Some(NatureCode::NotSubjectArt7);
    document.vat_summaries[0] =
        VatSummary::new(dec!(0), dec!(100.00), dec!(0)).nature(NatureCode::NotSubjectArt7);

    let generated = sdi::generate(&document, "00001").unwrap();
    let report = sdi::validate(&generated.xml);
    assert!(report.is_valid(), "unexpected errors: {:?}", report.errors);
}

#[test]
fn line_without_matching_summary_rejected() {
    let mut document = invoice();
    document.lines.push(
        LineItemBuilder::new(2, "Riga al 10%", dec!(80.00), dec!(80.00))
            .vat_rate(dec!(10))
            .build(),
    );
    // No summary row at 10% — only the 22% one exists.

    let generated = sdi::generate(&document, "00001").unwrap();
    let report = sdi::validate(&generated.xml);
    assert!(!report.is_valid());
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.message.contains("line 2") && e.message.contains("10")),
        "expected a cross-field summary error, got: {:?}",
        report.errors
    );
}

#[test]
fn unknown_codes_rejected() {
    let xml = generated_xml()
        .replace("<TipoDocumento>TD01</TipoDocumento>", "<TipoDocumento>TD99</TipoDocumento>")
        .replace("<RegimeFiscale>RF01</RegimeFiscale>", "<RegimeFiscale>RF03</RegimeFiscale>");

    let report = sdi::validate(&xml);
    let messages: Vec<_> = report.errors.iter().map(|e| e.message.clone()).collect();
    assert!(messages.iter().any(|m| m.contains("TD99")));
    assert!(messages.iter().any(|m| m.contains("RF03")));
}

#[test]
fn bad_checksum_rejected() {
    // 06363391002 has a wrong trailing check digit.
    let xml = generated_xml().replace("06363391001", "06363391002");
    let report = sdi::validate(&xml);
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.message.contains("checksum")),
        "expected checksum errors, got: {:?}",
        report.errors
    );
}

#[test]
fn wrong_routing_length_rejected() {
    let xml = generated_xml().replace(
        "<CodiceDestinatario>ABC1234</CodiceDestinatario>",
        "<CodiceDestinatario>ABC12</CodiceDestinatario>",
    );
    let report = sdi::validate(&xml);
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.path.ends_with("CodiceDestinatario") && e.message.contains("7")),
        "expected a routing-length error, got: {:?}",
        report.errors
    );
}

#[test]
fn pec_sentinel_requires_pec_address() {
    let xml = generated_xml().replace(
        "<CodiceDestinatario>ABC1234</CodiceDestinatario>",
        "<CodiceDestinatario>0000000</CodiceDestinatario>",
    );
    let report = sdi::validate(&xml);
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.path.ends_with("PECDestinatario")),
        "expected a missing-PEC error, got: {:?}",
        report.errors
    );
}

#[test]
fn bad_date_and_empty_number_rejected() {
    let xml = generated_xml()
        .replace("<Data>2024-03-01</Data>", "<Data>01/03/2024</Data>")
        .replace("<Numero>42/A</Numero>", "<Numero> </Numero>");
    let report = sdi::validate(&xml);
    assert!(report.errors.iter().any(|e| e.path.ends_with("Data")));
    assert!(report.errors.iter().any(|e| e.path.ends_with("Numero")));
}

#[test]
fn bad_cap_and_unknown_province_rejected() {
    let xml = generated_xml()
        .replace("<CAP>00100</CAP>", "<CAP>0010</CAP>")
        .replace("<Provincia>MI</Provincia>", "<Provincia>XX</Provincia>");
    let report = sdi::validate(&xml);
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.path.contains("CedentePrestatore") && e.path.ends_with("CAP"))
    );
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.path.contains("CessionarioCommittente") && e.path.ends_with("Provincia"))
    );
}

#[test]
fn invalid_payment_codes_and_iban_rejected() {
    let mut document = invoice();
    document.payment = Some(PaymentData {
        terms: PaymentTerms::FullPayment,
        details: vec![PaymentDetail {
            method: PaymentMethod::BankTransfer,
            due_date: None,
            amount: dec!(122.00),
            iban: Some("IT60X0542811101000000123456".into()),
        }],
    });
    let xml = sdi::generate(&document, "00001")
        .unwrap()
        .xml
        .replace("<CondizioniPagamento>TP02</CondizioniPagamento>", "<CondizioniPagamento>TP09</CondizioniPagamento>")
        .replace("<ModalitaPagamento>MP05</ModalitaPagamento>", "<ModalitaPagamento>MP99</ModalitaPagamento>")
        .replace(
            "<IBAN>IT60X0542811101000000123456</IBAN>",
            "<IBAN>IT60X05428111010000001234</IBAN>",
        );

    let report = sdi::validate(&xml);
    let messages: Vec<_> = report.errors.iter().map(|e| e.message.clone()).collect();
    assert!(messages.iter().any(|m| m.contains("TP09")));
    assert!(messages.iter().any(|m| m.contains("MP99")));
    assert!(messages.iter().any(|m| m.contains("IBAN")));
}

#[test]
fn errors_accumulate_across_layers() {
    // Corrupt the header (regime) and the body (document type) at once:
    // both defects must be reported together.
    let xml = generated_xml()
        .replace("<RegimeFiscale>RF01</RegimeFiscale>", "<RegimeFiscale>RF99</RegimeFiscale>")
        .replace("<TipoDocumento>TD01</TipoDocumento>", "<TipoDocumento>XXXX</TipoDocumento>");
    let report = sdi::validate(&xml);
    assert!(report.errors.len() >= 2);
    assert!(report.errors.iter().any(|e| e.path.contains("RegimeFiscale")));
    assert!(report.errors.iter().any(|e| e.path.contains("TipoDocumento")));
}

#[test]
fn quick_validate_matches_full_verdict() {
    let xml = generated_xml();
    assert!(sdi::quick_validate(&xml));
    assert!(!sdi::quick_validate(&xml.replace("06363391001", "06363391002")));
}
