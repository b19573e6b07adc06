use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::FatturaError;
use super::types::*;

impl PartyIdentity {
    /// Identity of a legal entity (Denominazione).
    pub fn company(name: impl Into<String>) -> Self {
        Self::Company { name: name.into() }
    }

    /// Identity of a natural person (Nome + Cognome).
    pub fn person(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self::Person {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// Builder for constructing invoice documents.
///
/// Construction never validates business rules — those belong to the
/// generator's pre-flight checks and to the validator.
///
/// ```
/// use chrono::NaiveDate;
/// use fatturapa::core::*;
/// use rust_decimal_macros::dec;
///
/// let invoice = InvoiceBuilder::new("42/A", NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
///     .issuer(
///         IssuerBuilder::new(
///             PartyIdentity::company("ACME S.r.l."),
///             AddressBuilder::new("Via Roma 1", "00100", "Roma", "IT").province("RM").build(),
///         )
///         .vat_number("06363391001")
///         .fiscal_regime(FiscalRegime::Ordinary)
///         .build(),
///     )
///     .recipient(
///         RecipientBuilder::new(
///             PartyIdentity::company("Cliente S.p.A."),
///             AddressBuilder::new("Corso Milano 2", "20121", "Milano", "IT").province("MI").build(),
///             RecipientRouting::Channel("ABC1234".into()),
///         )
///         .vat_number("01234567897")
///         .build(),
///     )
///     .add_line(LineItemBuilder::new(1, "Consulenza", dec!(100.00), dec!(100.00)).build())
///     .add_vat_summary(VatSummary::new(dec!(22), dec!(100.00), dec!(22.00)))
///     .build()
///     .unwrap();
///
/// assert_eq!(invoice.lines.len(), 1);
/// ```
pub struct InvoiceBuilder {
    document_type: DocumentType,
    currency: String,
    issue_date: NaiveDate,
    number: String,
    total_amount: Option<Decimal>,
    issuer: Option<Issuer>,
    recipient: Option<Recipient>,
    lines: Vec<LineItem>,
    vat_summaries: Vec<VatSummary>,
    payment: Option<PaymentData>,
    stamp_duty: Option<StampDuty>,
    social_security: Vec<SocialSecurityContribution>,
    withholding: Option<WithholdingTax>,
    related_documents: Vec<RelatedDocument>,
    attachments: Vec<Attachment>,
}

impl InvoiceBuilder {
    pub fn new(number: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self {
            document_type: DocumentType::Invoice,
            currency: "EUR".to_string(),
            issue_date,
            number: number.into(),
            total_amount: None,
            issuer: None,
            recipient: None,
            lines: Vec::new(),
            vat_summaries: Vec::new(),
            payment: None,
            stamp_duty: None,
            social_security: Vec::new(),
            withholding: None,
            related_documents: Vec::new(),
            attachments: Vec::new(),
        }
    }

    pub fn document_type(mut self, document_type: DocumentType) -> Self {
        self.document_type = document_type;
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn total_amount(mut self, amount: Decimal) -> Self {
        self.total_amount = Some(amount);
        self
    }

    pub fn issuer(mut self, issuer: Issuer) -> Self {
        self.issuer = Some(issuer);
        self
    }

    pub fn recipient(mut self, recipient: Recipient) -> Self {
        self.recipient = Some(recipient);
        self
    }

    pub fn add_line(mut self, line: LineItem) -> Self {
        self.lines.push(line);
        self
    }

    pub fn add_vat_summary(mut self, summary: VatSummary) -> Self {
        self.vat_summaries.push(summary);
        self
    }

    pub fn payment(mut self, payment: PaymentData) -> Self {
        self.payment = Some(payment);
        self
    }

    pub fn stamp_duty(mut self, amount: Decimal) -> Self {
        self.stamp_duty = Some(StampDuty { amount });
        self
    }

    pub fn add_social_security(mut self, contribution: SocialSecurityContribution) -> Self {
        self.social_security.push(contribution);
        self
    }

    pub fn withholding(mut self, withholding: WithholdingTax) -> Self {
        self.withholding = Some(withholding);
        self
    }

    pub fn add_related_document(mut self, related: RelatedDocument) -> Self {
        self.related_documents.push(related);
        self
    }

    pub fn add_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Build the document. Only the structurally required parts (issuer
    /// and recipient) are enforced here.
    pub fn build(self) -> Result<InvoiceDocument, FatturaError> {
        let issuer = self
            .issuer
            .ok_or_else(|| FatturaError::Builder("issuer is required".into()))?;
        let recipient = self
            .recipient
            .ok_or_else(|| FatturaError::Builder("recipient is required".into()))?;

        Ok(InvoiceDocument {
            document_type: self.document_type,
            currency: self.currency,
            issue_date: self.issue_date,
            number: self.number,
            total_amount: self.total_amount,
            issuer,
            recipient,
            lines: self.lines,
            vat_summaries: self.vat_summaries,
            payment: self.payment,
            stamp_duty: self.stamp_duty,
            social_security: self.social_security,
            withholding: self.withholding,
            related_documents: self.related_documents,
            attachments: self.attachments,
        })
    }
}

/// Builder for the seller party.
pub struct IssuerBuilder {
    identity: PartyIdentity,
    vat_number: Option<String>,
    fiscal_code: Option<String>,
    fiscal_regime: Option<FiscalRegime>,
    address: Address,
}

impl IssuerBuilder {
    pub fn new(identity: PartyIdentity, address: Address) -> Self {
        Self {
            identity,
            vat_number: None,
            fiscal_code: None,
            fiscal_regime: None,
            address,
        }
    }

    pub fn vat_number(mut self, vat: impl Into<String>) -> Self {
        self.vat_number = Some(vat.into());
        self
    }

    pub fn fiscal_code(mut self, code: impl Into<String>) -> Self {
        self.fiscal_code = Some(code.into());
        self
    }

    pub fn fiscal_regime(mut self, regime: FiscalRegime) -> Self {
        self.fiscal_regime = Some(regime);
        self
    }

    pub fn build(self) -> Issuer {
        Issuer {
            identity: self.identity,
            vat_number: self.vat_number,
            fiscal_code: self.fiscal_code,
            fiscal_regime: self.fiscal_regime,
            address: self.address,
        }
    }
}

/// Builder for the buyer party.
pub struct RecipientBuilder {
    identity: PartyIdentity,
    vat_number: Option<String>,
    fiscal_code: Option<String>,
    address: Address,
    routing: RecipientRouting,
}

impl RecipientBuilder {
    pub fn new(identity: PartyIdentity, address: Address, routing: RecipientRouting) -> Self {
        Self {
            identity,
            vat_number: None,
            fiscal_code: None,
            address,
            routing,
        }
    }

    pub fn vat_number(mut self, vat: impl Into<String>) -> Self {
        self.vat_number = Some(vat.into());
        self
    }

    pub fn fiscal_code(mut self, code: impl Into<String>) -> Self {
        self.fiscal_code = Some(code.into());
        self
    }

    pub fn build(self) -> Recipient {
        Recipient {
            identity: self.identity,
            vat_number: self.vat_number,
            fiscal_code: self.fiscal_code,
            address: self.address,
            routing: self.routing,
        }
    }
}

/// Builder for Address.
pub struct AddressBuilder {
    street: String,
    postal_code: String,
    municipality: String,
    province: Option<String>,
    country: String,
}

impl AddressBuilder {
    pub fn new(
        street: impl Into<String>,
        postal_code: impl Into<String>,
        municipality: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            postal_code: postal_code.into(),
            municipality: municipality.into(),
            province: None,
            country: country.into(),
        }
    }

    pub fn province(mut self, province: impl Into<String>) -> Self {
        self.province = Some(province.into());
        self
    }

    pub fn build(self) -> Address {
        Address {
            street: self.street,
            postal_code: self.postal_code,
            municipality: self.municipality,
            province: self.province,
            country: self.country,
        }
    }
}

/// Builder for LineItem. The VAT rate defaults to the Italian ordinary 22%.
pub struct LineItemBuilder {
    number: u32,
    description: String,
    quantity: Option<Decimal>,
    unit: Option<String>,
    unit_price: Decimal,
    total_price: Decimal,
    vat_rate: Decimal,
    nature: Option<NatureCode>,
}

impl LineItemBuilder {
    pub fn new(
        number: u32,
        description: impl Into<String>,
        unit_price: Decimal,
        total_price: Decimal,
    ) -> Self {
        Self {
            number,
            description: description.into(),
            quantity: None,
            unit: None,
            unit_price,
            total_price,
            vat_rate: Decimal::new(22, 0),
            nature: None,
        }
    }

    pub fn quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn vat_rate(mut self, rate: Decimal) -> Self {
        self.vat_rate = rate;
        self
    }

    pub fn nature(mut self, nature: NatureCode) -> Self {
        self.nature = Some(nature);
        self
    }

    pub fn build(self) -> LineItem {
        LineItem {
            number: self.number,
            description: self.description,
            quantity: self.quantity,
            unit: self.unit,
            unit_price: self.unit_price,
            total_price: self.total_price,
            vat_rate: self.vat_rate,
            nature: self.nature,
        }
    }
}

impl VatSummary {
    /// Summary row for a taxed rate; nature and liability start unset.
    pub fn new(vat_rate: Decimal, taxable_amount: Decimal, tax_amount: Decimal) -> Self {
        Self {
            vat_rate,
            nature: None,
            taxable_amount,
            tax_amount,
            liability: None,
        }
    }

    pub fn nature(mut self, nature: NatureCode) -> Self {
        self.nature = Some(nature);
        self
    }

    pub fn liability(mut self, liability: VatLiability) -> Self {
        self.liability = Some(liability);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn test_address() -> Address {
        AddressBuilder::new("Via Roma 1", "00100", "Roma", "IT")
            .province("RM")
            .build()
    }

    #[test]
    fn builds_complete_document() {
        let invoice = InvoiceBuilder::new("42/A", test_date())
            .issuer(
                IssuerBuilder::new(PartyIdentity::company("ACME S.r.l."), test_address())
                    .vat_number("06363391001")
                    .fiscal_regime(FiscalRegime::Ordinary)
                    .build(),
            )
            .recipient(
                RecipientBuilder::new(
                    PartyIdentity::person("Mario", "Rossi"),
                    test_address(),
                    RecipientRouting::CertifiedEmail("mario@pec.example.it".into()),
                )
                .fiscal_code("RSSMRA80A01H501U")
                .build(),
            )
            .add_line(
                LineItemBuilder::new(1, "Consulenza", dec!(100), dec!(100))
                    .quantity(dec!(1))
                    .build(),
            )
            .add_vat_summary(VatSummary::new(dec!(22), dec!(100), dec!(22)))
            .build()
            .unwrap();

        assert_eq!(invoice.document_type, DocumentType::Invoice);
        assert_eq!(invoice.currency, "EUR");
        assert_eq!(invoice.lines[0].vat_rate, dec!(22));
        assert!(matches!(
            invoice.recipient.identity,
            PartyIdentity::Person { .. }
        ));
    }

    #[test]
    fn missing_parties_rejected() {
        let err = InvoiceBuilder::new("1", test_date()).build().unwrap_err();
        assert!(err.to_string().contains("issuer"));
    }

    #[test]
    fn vat_summary_helpers() {
        let summary = VatSummary::new(dec!(0), dec!(50), dec!(0))
            .nature(NatureCode::Exempt)
            .liability(VatLiability::Immediate);
        assert_eq!(summary.nature, Some(NatureCode::Exempt));
        assert_eq!(summary.liability, Some(VatLiability::Immediate));
    }
}
