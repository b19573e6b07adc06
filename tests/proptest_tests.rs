//! Property-based tests for the fatturapa crate.
//!
//! Run with: `cargo test --features all --test proptest_tests`

#![cfg(feature = "sdi")]

use chrono::NaiveDate;
use fatturapa::core::*;
use fatturapa::sdi;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn issuer() -> Issuer {
    IssuerBuilder::new(
        PartyIdentity::company("ACME S.r.l."),
        AddressBuilder::new("Via Roma 1", "00100", "Roma", "IT")
            .province("RM")
            .build(),
    )
    .vat_number("06363391001")
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

// ── Proptest Strategies ─────────────────────────────────────────────────────

/// Ten-digit numeric strings — the checksum input space.
fn arb_ten_digits() -> impl Strategy<Value = String> {
    proptest::collection::vec(0u8..10, 10)
        .prop_map(|digits| digits.iter().map(|d| (b'0' + d) as char).collect())
}

/// A reasonable price in cents (0.01 to 99999.99).
fn arb_price() -> impl Strategy<Value = Decimal> {
    (1u64..10_000_000u64).prop_map(|cents| Decimal::new(cents as i64, 2))
}

/// A taxed (rate, nature) pair — either a positive rate with no nature,
/// or a zero rate with a registered nature code.
fn arb_tax() -> impl Strategy<Value = (Decimal, Option<NatureCode>)> {
    prop_oneof![
        Just((dec!(22), None)),
        Just((dec!(10), None)),
        Just((dec!(4), None)),
        Just((dec!(0), Some(NatureCode::Exempt))),
        Just((dec!(0), Some(NatureCode::NotSubjectArt7))),
        Just((dec!(0), Some(NatureCode::ReverseChargeConstructionSubcontract))),
    ]
}

proptest! {
    /// The computed check digit is the only digit that completes a valid
    /// partita IVA.
    #[test]
    fn checksum_completion_is_unique(base in arb_ten_digits()) {
        let check = vat_check_digit(&base).unwrap();
        for digit in 0..10u32 {
            let candidate = format!("{base}{digit}");
            prop_assert_eq!(is_valid_vat_number(&candidate), digit == check);
        }
    }

    /// File-name derivation is total and shape-stable for any digit-string
    /// tax id and alphanumeric progressive.
    #[test]
    fn file_name_shape(vat in "[0-9]{1,11}", progressive in "[a-zA-Z0-9]{1,8}") {
        let name = sdi::generate_file_name(&vat, &progressive);
        prop_assert!(name.starts_with("IT"));
        prop_assert!(name.ends_with(".xml"));
        // "IT" + 11 + "_" + 5 + ".xml"
        prop_assert_eq!(name.len(), 2 + 11 + 1 + 5 + 4);
        prop_assert_eq!(&name, &sdi::generate_file_name(&vat, &progressive));
    }

    /// Round-trip soundness: any document that passes pre-flight validates
    /// cleanly, whatever the line mix.
    #[test]
    fn generated_documents_validate(
        lines in proptest::collection::vec((arb_price(), arb_tax()), 1..8),
        progressive in "[A-Z0-9]{1,5}",
    ) {
        let mut builder = InvoiceBuilder::new("PROP/1", date(2024, 6, 15))
            .issuer(issuer())
            .recipient(recipient());

        // One summary row per distinct (rate, nature) pair, as the
        // cross-field invariant requires.
        let mut summaries: Vec<(Decimal, Option<NatureCode>, Decimal)> = Vec::new();
        for (i, (price, (rate, nature))) in lines.iter().enumerate() {
            let mut line = LineItemBuilder::new(i as u32 + 1, "Voce generata", *price, *price)
                .vat_rate(*rate);
            if let Some(nature) = nature {
                line = line.nature(*nature);
            }
            builder = builder.add_line(line.build());

            match summaries.iter_mut().find(|(r, n, _)| r == rate && n == nature) {
                Some((_, _, taxable)) => *taxable += *price,
                None => summaries.push((*rate, *nature, *price)),
            }
        }
        for (rate, nature, taxable) in summaries {
            let tax = (taxable * rate / dec!(100)).round_dp(2);
            let mut summary = VatSummary::new(rate, taxable, tax);
            if let Some(nature) = nature {
                summary = summary.nature(nature);
            }
            builder = builder.add_vat_summary(summary);
        }

        let document = builder.build().unwrap();
        let generated = sdi::generate(&document, &progressive).unwrap();
        let report = sdi::validate(&generated.xml);
        prop_assert!(report.is_valid(), "errors: {:?}", report.errors);
    }

    /// Escaping free text never breaks the document structure. The first
    /// character is non-blank so the description stays non-empty.
    #[test]
    fn arbitrary_descriptions_stay_well_formed(description in "[!-~][ -~]{0,199}") {
        let document = InvoiceBuilder::new("PROP/2", date(2024, 6, 15))
            .issuer(issuer())
            .recipient(recipient())
            .add_line(LineItemBuilder::new(1, description, dec!(10.00), dec!(10.00)).build())
            .add_vat_summary(VatSummary::new(dec!(22), dec!(10.00), dec!(2.20)))
            .build()
            .unwrap();

        let generated = sdi::generate(&document, "00001").unwrap();
        let report = sdi::validate(&generated.xml);
        prop_assert!(report.is_valid(), "errors: {:?}", report.errors);
    }
}
