use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The top-level invoice document handed to the generator.
///
/// Field numbering in the docs refers to the FatturaPA v1.2 tracciato
/// (e.g. 2.1.1.1 TipoDocumento).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDocument {
    /// 2.1.1.1: Document type code (TD registry).
    pub document_type: DocumentType,
    /// 2.1.1.2: Currency code (ISO 4217, e.g. "EUR").
    pub currency: String,
    /// 2.1.1.3: Issue date.
    pub issue_date: NaiveDate,
    /// 2.1.1.4: Document number (free text, mandatory).
    pub number: String,
    /// 2.1.1.9: Total document amount, informational.
    pub total_amount: Option<Decimal>,
    /// 1.2: Seller (CedentePrestatore).
    pub issuer: Issuer,
    /// 1.4: Buyer (CessionarioCommittente).
    pub recipient: Recipient,
    /// 2.2.1: Invoice lines (DettaglioLinee), at least one.
    pub lines: Vec<LineItem>,
    /// 2.2.2: VAT summary rows (DatiRiepilogo), at least one.
    pub vat_summaries: Vec<VatSummary>,
    /// 2.4: Payment data (DatiPagamento).
    pub payment: Option<PaymentData>,
    /// 2.1.1.6: Virtual stamp duty (DatiBollo).
    pub stamp_duty: Option<StampDuty>,
    /// 2.1.1.7: Social-security fund contributions (DatiCassaPrevidenziale).
    pub social_security: Vec<SocialSecurityContribution>,
    /// 2.1.1.5: Withholding tax (DatiRitenuta).
    pub withholding: Option<WithholdingTax>,
    /// 2.1.8: Delivery-note references (DatiDDT).
    pub related_documents: Vec<RelatedDocument>,
    /// 2.5: Embedded attachments (Allegati).
    pub attachments: Vec<Attachment>,
}

/// 1.2.1.3: Party identity — a legal entity has a business name, a natural
/// person has first and last name. The two forms are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartyIdentity {
    /// 1.2.1.3.1: Denominazione.
    Company { name: String },
    /// 1.2.1.3.2 / 1.2.1.3.3: Nome + Cognome.
    Person {
        first_name: String,
        last_name: String,
    },
}

/// 1.2: Seller party (CedentePrestatore).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issuer {
    pub identity: PartyIdentity,
    /// 1.2.1.1: VAT number (IdCodice, digits only). Pre-flight-mandatory.
    pub vat_number: Option<String>,
    /// 1.2.1.2: CodiceFiscale.
    pub fiscal_code: Option<String>,
    /// 1.2.1.8: RegimeFiscale. Pre-flight-mandatory.
    pub fiscal_regime: Option<FiscalRegime>,
    /// 1.2.2: Sede.
    pub address: Address,
}

/// 1.4: Buyer party (CessionarioCommittente).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    pub identity: PartyIdentity,
    /// 1.4.1.1: VAT number (IdCodice, digits only).
    pub vat_number: Option<String>,
    /// 1.4.1.2: CodiceFiscale. At least one of VAT number / fiscal code
    /// must be present.
    pub fiscal_code: Option<String>,
    /// 1.4.2: Sede.
    pub address: Address,
    /// 1.1.4: How SdI routes the document to this recipient.
    pub routing: RecipientRouting,
}

/// 1.1.4: Routing channel (CodiceDestinatario / PECDestinatario).
///
/// The routing form also selects the transmission format: a
/// public-administration office code produces an FPA12 document, every
/// other form produces FPR12.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecipientRouting {
    /// 7-character SdI channel code of a private-sector recipient.
    Channel(String),
    /// 6-character IPA office code of a public-administration recipient.
    PublicAdministration(String),
    /// Delivery via certified email: CodiceDestinatario is the all-zero
    /// sentinel and the PEC address is carried alongside.
    CertifiedEmail(String),
    /// Foreign recipient without an SdI channel ("XXXXXXX").
    Foreign,
}

/// All-zero CodiceDestinatario sentinel — route via certified email.
pub const ROUTING_PEC_SENTINEL: &str = "0000000";
/// CodiceDestinatario sentinel for foreign recipients.
pub const ROUTING_FOREIGN_SENTINEL: &str = "XXXXXXX";

impl RecipientRouting {
    /// The CodiceDestinatario value emitted for this routing form.
    pub fn code(&self) -> &str {
        match self {
            Self::Channel(code) | Self::PublicAdministration(code) => code,
            Self::CertifiedEmail(_) => ROUTING_PEC_SENTINEL,
            Self::Foreign => ROUTING_FOREIGN_SENTINEL,
        }
    }

    /// Certified-email address, when routed that way.
    pub fn certified_email(&self) -> Option<&str> {
        match self {
            Self::CertifiedEmail(pec) => Some(pec),
            _ => None,
        }
    }
}

/// 1.2.2 / 1.4.2: Postal address (Sede).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    /// Indirizzo: street and house number.
    pub street: String,
    /// CAP: postal code, 5 digits for domestic addresses.
    pub postal_code: String,
    /// Comune.
    pub municipality: String,
    /// Provincia: two-letter code, mandatory when the country is IT.
    pub province: Option<String>,
    /// Nazione: ISO 3166-1 alpha-2 country code.
    pub country: String,
}

impl Address {
    /// Whether this is an Italian address (province and CAP rules apply).
    pub fn is_domestic(&self) -> bool {
        self.country == "IT"
    }
}

/// 2.2.1: Invoice line (DettaglioLinee).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// 2.2.1.1: NumeroLinea — positive, unique within the document.
    pub number: u32,
    /// 2.2.1.4: Descrizione — non-empty; the generator truncates
    /// oversized text instead of rejecting it.
    pub description: String,
    /// 2.2.1.5: Quantita.
    pub quantity: Option<Decimal>,
    /// 2.2.1.6: UnitaMisura.
    pub unit: Option<String>,
    /// 2.2.1.9: PrezzoUnitario.
    pub unit_price: Decimal,
    /// 2.2.1.11: PrezzoTotale.
    pub total_price: Decimal,
    /// 2.2.1.12: AliquotaIVA — percentage, 0 to 100.
    pub vat_rate: Decimal,
    /// 2.2.1.14: Natura — mandatory when the rate is zero.
    pub nature: Option<NatureCode>,
}

/// 2.2.2: One VAT summary row per distinct (rate, nature) pair
/// (DatiRiepilogo).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VatSummary {
    /// 2.2.2.1: AliquotaIVA.
    pub vat_rate: Decimal,
    /// 2.2.2.2: Natura — mandatory iff the rate is zero.
    pub nature: Option<NatureCode>,
    /// 2.2.2.5: ImponibileImporto.
    pub taxable_amount: Decimal,
    /// 2.2.2.6: Imposta.
    pub tax_amount: Decimal,
    /// 2.2.2.7: EsigibilitaIVA.
    pub liability: Option<VatLiability>,
}

/// 2.4: Payment data (DatiPagamento).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentData {
    /// 2.4.1: CondizioniPagamento.
    pub terms: PaymentTerms,
    /// 2.4.2: DettaglioPagamento rows.
    pub details: Vec<PaymentDetail>,
}

/// 2.4.2: A single payment instruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentDetail {
    /// 2.4.2.2: ModalitaPagamento.
    pub method: PaymentMethod,
    /// 2.4.2.5: DataScadenzaPagamento.
    pub due_date: Option<NaiveDate>,
    /// 2.4.2.6: ImportoPagamento.
    pub amount: Decimal,
    /// 2.4.2.13: IBAN.
    pub iban: Option<String>,
}

/// 2.1.1.6: Virtual stamp duty (DatiBollo).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StampDuty {
    /// ImportoBollo.
    pub amount: Decimal,
}

/// 2.1.1.7: Social-security fund contribution (DatiCassaPrevidenziale).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialSecurityContribution {
    /// TipoCassa.
    pub fund: PensionFund,
    /// AlCassa: contribution rate percentage.
    pub rate: Decimal,
    /// ImportoContributoCassa.
    pub amount: Decimal,
    /// ImponibileCassa.
    pub taxable_amount: Option<Decimal>,
    /// AliquotaIVA applied to the contribution.
    pub vat_rate: Decimal,
    /// Natura — when the contribution's VAT rate is zero.
    pub nature: Option<NatureCode>,
}

/// 2.1.1.5: Withholding tax (DatiRitenuta).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithholdingTax {
    /// TipoRitenuta.
    pub kind: WithholdingType,
    /// ImportoRitenuta.
    pub amount: Decimal,
    /// AliquotaRitenuta.
    pub rate: Decimal,
    /// CausalePagamento (CU payment reason code, e.g. "A").
    pub payment_reason: String,
}

/// 2.1.8: Delivery-note reference (DatiDDT).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedDocument {
    /// NumeroDDT.
    pub number: String,
    /// DataDDT.
    pub date: Option<NaiveDate>,
    /// RiferimentoNumeroLinea: lines covered by this delivery note.
    pub line_refs: Vec<u32>,
}

/// 2.5: Embedded attachment (Allegati).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// NomeAttachment.
    pub name: String,
    /// FormatoAttachment (e.g. "PDF").
    pub format: Option<String>,
    /// DescrizioneAttachment.
    pub description: Option<String>,
    /// Attachment: base64-encoded payload.
    pub data: String,
}

/// 2.1.1.1 — TipoDocumento registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// TD01 — Fattura (standard invoice).
    Invoice,
    /// TD02 — Advance payment on an invoice.
    AdvancePayment,
    /// TD03 — Advance payment on a fee note.
    AdvanceFee,
    /// TD04 — Nota di credito (credit note).
    CreditNote,
    /// TD05 — Nota di debito (debit note).
    DebitNote,
    /// TD06 — Parcella (professional fee note).
    FeeNote,
    /// TD16 — Reverse-charge integration (domestic).
    ReverseChargeIntegration,
    /// TD17 — Self-billing for services purchased abroad.
    SelfBilledForeignServices,
    /// TD18 — Integration for intra-community goods purchases.
    IntraCommunityGoods,
    /// TD19 — Self-billing for goods ex art. 17 c.2 DPR 633/72.
    SelfBilledGoods,
    /// TD20 — Self-billed regularization.
    SelfBilledRegularization,
    /// TD21 — Self-billing for export-ceiling excess.
    SelfBilledCeilingExcess,
    /// TD22 — Extraction of goods from a VAT warehouse.
    WarehouseExtraction,
    /// TD23 — Extraction from a VAT warehouse with VAT payment.
    WarehouseExtractionWithVat,
    /// TD24 — Fattura differita (deferred invoice, art. 21 c.4 lett. a).
    DeferredInvoice,
    /// TD25 — Deferred invoice, art. 21 c.4 third sentence lett. b.
    DeferredInvoiceThirdParty,
    /// TD26 — Transfer of depreciable assets.
    FixedAssetTransfer,
    /// TD27 — Self-consumption / free-of-charge transfers.
    SelfConsumption,
    /// TD28 — Purchases from San Marino with VAT.
    SanMarinoPurchase,
}

impl DocumentType {
    /// Four-character TD code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Invoice => "TD01",
            Self::AdvancePayment => "TD02",
            Self::AdvanceFee => "TD03",
            Self::CreditNote => "TD04",
            Self::DebitNote => "TD05",
            Self::FeeNote => "TD06",
            Self::ReverseChargeIntegration => "TD16",
            Self::SelfBilledForeignServices => "TD17",
            Self::IntraCommunityGoods => "TD18",
            Self::SelfBilledGoods => "TD19",
            Self::SelfBilledRegularization => "TD20",
            Self::SelfBilledCeilingExcess => "TD21",
            Self::WarehouseExtraction => "TD22",
            Self::WarehouseExtractionWithVat => "TD23",
            Self::DeferredInvoice => "TD24",
            Self::DeferredInvoiceThirdParty => "TD25",
            Self::FixedAssetTransfer => "TD26",
            Self::SelfConsumption => "TD27",
            Self::SanMarinoPurchase => "TD28",
        }
    }

    /// Parse from a TD code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "TD01" => Some(Self::Invoice),
            "TD02" => Some(Self::AdvancePayment),
            "TD03" => Some(Self::AdvanceFee),
            "TD04" => Some(Self::CreditNote),
            "TD05" => Some(Self::DebitNote),
            "TD06" => Some(Self::FeeNote),
            "TD16" => Some(Self::ReverseChargeIntegration),
            "TD17" => Some(Self::SelfBilledForeignServices),
            "TD18" => Some(Self::IntraCommunityGoods),
            "TD19" => Some(Self::SelfBilledGoods),
            "TD20" => Some(Self::SelfBilledRegularization),
            "TD21" => Some(Self::SelfBilledCeilingExcess),
            "TD22" => Some(Self::WarehouseExtraction),
            "TD23" => Some(Self::WarehouseExtractionWithVat),
            "TD24" => Some(Self::DeferredInvoice),
            "TD25" => Some(Self::DeferredInvoiceThirdParty),
            "TD26" => Some(Self::FixedAssetTransfer),
            "TD27" => Some(Self::SelfConsumption),
            "TD28" => Some(Self::SanMarinoPurchase),
            _ => None,
        }
    }
}

/// 1.2.1.8 — RegimeFiscale registry. RF03 was retired and is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FiscalRegime {
    /// RF01 — Ordinary regime.
    Ordinary,
    /// RF02 — Minimum taxpayers (art. 1 c.96-117 L. 244/2007).
    MinimumTaxpayers,
    /// RF04 — Agriculture and connected activities, fishing.
    Agriculture,
    /// RF05 — Sale of salts and tobaccos.
    SaltAndTobacco,
    /// RF06 — Match trade.
    Matches,
    /// RF07 — Publishing.
    Publishing,
    /// RF08 — Public telephony services.
    PublicTelephony,
    /// RF09 — Resale of public transport and parking documents.
    TransportDocuments,
    /// RF10 — Entertainment, games and other activities (tariff DPR 640/72).
    Entertainment,
    /// RF11 — Travel and tourism agencies.
    TravelAgencies,
    /// RF12 — Agritourism.
    Agritourism,
    /// RF13 — Door-to-door sales.
    DoorToDoorSales,
    /// RF14 — Second-hand goods, works of art, antiques (margin scheme).
    SecondHandGoods,
    /// RF15 — Works-of-art auction agencies.
    AuctionAgencies,
    /// RF16 — Cash accounting by public administrations.
    CashAccountingPa,
    /// RF17 — Cash accounting (art. 32-bis DL 83/2012).
    CashAccounting,
    /// RF18 — Other.
    Other,
    /// RF19 — Flat-rate regime (L. 190/2014).
    FlatRate,
}

impl FiscalRegime {
    /// Four-character RF code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ordinary => "RF01",
            Self::MinimumTaxpayers => "RF02",
            Self::Agriculture => "RF04",
            Self::SaltAndTobacco => "RF05",
            Self::Matches => "RF06",
            Self::Publishing => "RF07",
            Self::PublicTelephony => "RF08",
            Self::TransportDocuments => "RF09",
            Self::Entertainment => "RF10",
            Self::TravelAgencies => "RF11",
            Self::Agritourism => "RF12",
            Self::DoorToDoorSales => "RF13",
            Self::SecondHandGoods => "RF14",
            Self::AuctionAgencies => "RF15",
            Self::CashAccountingPa => "RF16",
            Self::CashAccounting => "RF17",
            Self::Other => "RF18",
            Self::FlatRate => "RF19",
        }
    }

    /// Parse from an RF code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "RF01" => Some(Self::Ordinary),
            "RF02" => Some(Self::MinimumTaxpayers),
            "RF04" => Some(Self::Agriculture),
            "RF05" => Some(Self::SaltAndTobacco),
            "RF06" => Some(Self::Matches),
            "RF07" => Some(Self::Publishing),
            "RF08" => Some(Self::PublicTelephony),
            "RF09" => Some(Self::TransportDocuments),
            "RF10" => Some(Self::Entertainment),
            "RF11" => Some(Self::TravelAgencies),
            "RF12" => Some(Self::Agritourism),
            "RF13" => Some(Self::DoorToDoorSales),
            "RF14" => Some(Self::SecondHandGoods),
            "RF15" => Some(Self::AuctionAgencies),
            "RF16" => Some(Self::CashAccountingPa),
            "RF17" => Some(Self::CashAccounting),
            "RF18" => Some(Self::Other),
            "RF19" => Some(Self::FlatRate),
            _ => None,
        }
    }
}

/// 2.2.1.14 — Natura registry: the legal reason a line carries no VAT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NatureCode {
    /// N1 — Excluded ex art. 15 DPR 633/72.
    Excluded,
    /// N2.1 — Not subject to VAT, arts. 7 to 7-septies DPR 633/72.
    NotSubjectArt7,
    /// N2.2 — Not subject to VAT, other cases.
    NotSubjectOther,
    /// N3.1 — Non-taxable: exports.
    NonTaxableExport,
    /// N3.2 — Non-taxable: intra-community supplies.
    NonTaxableIntraCommunity,
    /// N3.3 — Non-taxable: supplies to San Marino.
    NonTaxableSanMarino,
    /// N3.4 — Non-taxable: operations assimilated to exports.
    NonTaxableAssimilated,
    /// N3.5 — Non-taxable: following declarations of intent.
    NonTaxableDeclarationOfIntent,
    /// N3.6 — Non-taxable: other operations.
    NonTaxableOther,
    /// N4 — Exempt.
    Exempt,
    /// N5 — Margin scheme / VAT not exposed.
    MarginScheme,
    /// N6.1 — Reverse charge: scrap and other recovered materials.
    ReverseChargeScrap,
    /// N6.2 — Reverse charge: gold and pure silver.
    ReverseChargeGold,
    /// N6.3 — Reverse charge: construction subcontracting.
    ReverseChargeConstructionSubcontract,
    /// N6.4 — Reverse charge: buildings.
    ReverseChargeBuildings,
    /// N6.5 — Reverse charge: mobile phones.
    ReverseChargeMobilePhones,
    /// N6.6 — Reverse charge: electronic products.
    ReverseChargeElectronics,
    /// N6.7 — Reverse charge: construction-sector services.
    ReverseChargeConstruction,
    /// N6.8 — Reverse charge: energy sector.
    ReverseChargeEnergy,
    /// N6.9 — Reverse charge: other cases.
    ReverseChargeOther,
    /// N7 — VAT paid in another EU member state.
    VatPaidInOtherEuState,
}

impl NatureCode {
    /// Natura code string (e.g. "N2.1").
    pub fn code(&self) -> &'static str {
        match self {
            Self::Excluded => "N1",
            Self::NotSubjectArt7 => "N2.1",
            Self::NotSubjectOther => "N2.2",
            Self::NonTaxableExport => "N3.1",
            Self::NonTaxableIntraCommunity => "N3.2",
            Self::NonTaxableSanMarino => "N3.3",
            Self::NonTaxableAssimilated => "N3.4",
            Self::NonTaxableDeclarationOfIntent => "N3.5",
            Self::NonTaxableOther => "N3.6",
            Self::Exempt => "N4",
            Self::MarginScheme => "N5",
            Self::ReverseChargeScrap => "N6.1",
            Self::ReverseChargeGold => "N6.2",
            Self::ReverseChargeConstructionSubcontract => "N6.3",
            Self::ReverseChargeBuildings => "N6.4",
            Self::ReverseChargeMobilePhones => "N6.5",
            Self::ReverseChargeElectronics => "N6.6",
            Self::ReverseChargeConstruction => "N6.7",
            Self::ReverseChargeEnergy => "N6.8",
            Self::ReverseChargeOther => "N6.9",
            Self::VatPaidInOtherEuState => "N7",
        }
    }

    /// Parse from a Natura code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "N1" => Some(Self::Excluded),
            "N2.1" => Some(Self::NotSubjectArt7),
            "N2.2" => Some(Self::NotSubjectOther),
            "N3.1" => Some(Self::NonTaxableExport),
            "N3.2" => Some(Self::NonTaxableIntraCommunity),
            "N3.3" => Some(Self::NonTaxableSanMarino),
            "N3.4" => Some(Self::NonTaxableAssimilated),
            "N3.5" => Some(Self::NonTaxableDeclarationOfIntent),
            "N3.6" => Some(Self::NonTaxableOther),
            "N4" => Some(Self::Exempt),
            "N5" => Some(Self::MarginScheme),
            "N6.1" => Some(Self::ReverseChargeScrap),
            "N6.2" => Some(Self::ReverseChargeGold),
            "N6.3" => Some(Self::ReverseChargeConstructionSubcontract),
            "N6.4" => Some(Self::ReverseChargeBuildings),
            "N6.5" => Some(Self::ReverseChargeMobilePhones),
            "N6.6" => Some(Self::ReverseChargeElectronics),
            "N6.7" => Some(Self::ReverseChargeConstruction),
            "N6.8" => Some(Self::ReverseChargeEnergy),
            "N6.9" => Some(Self::ReverseChargeOther),
            "N7" => Some(Self::VatPaidInOtherEuState),
            _ => None,
        }
    }
}

/// 2.2.2.7 — EsigibilitaIVA: when the VAT on a summary row becomes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VatLiability {
    /// I — Immediate.
    Immediate,
    /// D — Deferred.
    Deferred,
    /// S — Split payment (scissione dei pagamenti).
    SplitPayment,
}

impl VatLiability {
    /// Single-letter code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Immediate => "I",
            Self::Deferred => "D",
            Self::SplitPayment => "S",
        }
    }

    /// Parse from the single-letter code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "I" => Some(Self::Immediate),
            "D" => Some(Self::Deferred),
            "S" => Some(Self::SplitPayment),
            _ => None,
        }
    }
}

/// 2.4.1 — CondizioniPagamento registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentTerms {
    /// TP01 — Payment in installments.
    Installments,
    /// TP02 — Full payment.
    FullPayment,
    /// TP03 — Advance.
    Advance,
}

impl PaymentTerms {
    /// Four-character TP code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Installments => "TP01",
            Self::FullPayment => "TP02",
            Self::Advance => "TP03",
        }
    }

    /// Parse from a TP code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "TP01" => Some(Self::Installments),
            "TP02" => Some(Self::FullPayment),
            "TP03" => Some(Self::Advance),
            _ => None,
        }
    }
}

/// 2.4.2.2 — ModalitaPagamento registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// MP01 — Cash.
    Cash,
    /// MP02 — Cheque.
    Cheque,
    /// MP03 — Banker's draft.
    BankersDraft,
    /// MP04 — Cash at the treasury.
    TreasuryCash,
    /// MP05 — Bank transfer.
    BankTransfer,
    /// MP06 — Promissory note.
    PromissoryNote,
    /// MP07 — Bank payment slip.
    BankBulletin,
    /// MP08 — Payment card.
    PaymentCard,
    /// MP09 — Direct debit (RID).
    DirectDebit,
    /// MP10 — Utilities direct debit.
    UtilitiesDirectDebit,
    /// MP11 — Fast direct debit.
    FastDirectDebit,
    /// MP12 — RIBA collection order.
    Riba,
    /// MP13 — MAV payment slip.
    Mav,
    /// MP14 — Tax-office receipt.
    TaxOfficeReceipt,
    /// MP15 — Giro on special accounting accounts.
    SpecialAccountingGiro,
    /// MP16 — Bank domiciliation.
    BankDomiciliation,
    /// MP17 — Postal domiciliation.
    PostalDomiciliation,
    /// MP18 — Postal current-account slip.
    PostalBulletin,
    /// MP19 — SEPA direct debit.
    SepaDirectDebit,
    /// MP20 — SEPA direct debit CORE.
    SepaDirectDebitCore,
    /// MP21 — SEPA direct debit B2B.
    SepaDirectDebitB2b,
    /// MP22 — Withholding on sums already collected.
    WithholdingOnSums,
    /// MP23 — PagoPA.
    PagoPa,
}

impl PaymentMethod {
    /// Four-character MP code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Cash => "MP01",
            Self::Cheque => "MP02",
            Self::BankersDraft => "MP03",
            Self::TreasuryCash => "MP04",
            Self::BankTransfer => "MP05",
            Self::PromissoryNote => "MP06",
            Self::BankBulletin => "MP07",
            Self::PaymentCard => "MP08",
            Self::DirectDebit => "MP09",
            Self::UtilitiesDirectDebit => "MP10",
            Self::FastDirectDebit => "MP11",
            Self::Riba => "MP12",
            Self::Mav => "MP13",
            Self::TaxOfficeReceipt => "MP14",
            Self::SpecialAccountingGiro => "MP15",
            Self::BankDomiciliation => "MP16",
            Self::PostalDomiciliation => "MP17",
            Self::PostalBulletin => "MP18",
            Self::SepaDirectDebit => "MP19",
            Self::SepaDirectDebitCore => "MP20",
            Self::SepaDirectDebitB2b => "MP21",
            Self::WithholdingOnSums => "MP22",
            Self::PagoPa => "MP23",
        }
    }

    /// Parse from an MP code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "MP01" => Some(Self::Cash),
            "MP02" => Some(Self::Cheque),
            "MP03" => Some(Self::BankersDraft),
            "MP04" => Some(Self::TreasuryCash),
            "MP05" => Some(Self::BankTransfer),
            "MP06" => Some(Self::PromissoryNote),
            "MP07" => Some(Self::BankBulletin),
            "MP08" => Some(Self::PaymentCard),
            "MP09" => Some(Self::DirectDebit),
            "MP10" => Some(Self::UtilitiesDirectDebit),
            "MP11" => Some(Self::FastDirectDebit),
            "MP12" => Some(Self::Riba),
            "MP13" => Some(Self::Mav),
            "MP14" => Some(Self::TaxOfficeReceipt),
            "MP15" => Some(Self::SpecialAccountingGiro),
            "MP16" => Some(Self::BankDomiciliation),
            "MP17" => Some(Self::PostalDomiciliation),
            "MP18" => Some(Self::PostalBulletin),
            "MP19" => Some(Self::SepaDirectDebit),
            "MP20" => Some(Self::SepaDirectDebitCore),
            "MP21" => Some(Self::SepaDirectDebitB2b),
            "MP22" => Some(Self::WithholdingOnSums),
            "MP23" => Some(Self::PagoPa),
            _ => None,
        }
    }
}

/// 2.1.1.5.1 — TipoRitenuta registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WithholdingType {
    /// RT01 — Withholding for natural persons.
    NaturalPersons,
    /// RT02 — Withholding for legal persons.
    LegalPersons,
    /// RT03 — INPS contribution.
    InpsContribution,
    /// RT04 — ENASARCO contribution.
    EnasarcoContribution,
    /// RT05 — ENPAM contribution.
    EnpamContribution,
    /// RT06 — Other social-security contribution.
    OtherContribution,
}

impl WithholdingType {
    /// Four-character RT code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NaturalPersons => "RT01",
            Self::LegalPersons => "RT02",
            Self::InpsContribution => "RT03",
            Self::EnasarcoContribution => "RT04",
            Self::EnpamContribution => "RT05",
            Self::OtherContribution => "RT06",
        }
    }

    /// Parse from an RT code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "RT01" => Some(Self::NaturalPersons),
            "RT02" => Some(Self::LegalPersons),
            "RT03" => Some(Self::InpsContribution),
            "RT04" => Some(Self::EnasarcoContribution),
            "RT05" => Some(Self::EnpamContribution),
            "RT06" => Some(Self::OtherContribution),
            _ => None,
        }
    }
}

/// 2.1.1.7.1 — TipoCassa registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PensionFund {
    /// TC01 — Lawyers' national fund.
    Lawyers,
    /// TC02 — Chartered accountants' fund.
    Accountants,
    /// TC03 — Surveyors' fund.
    Surveyors,
    /// TC04 — Engineers' and architects' fund.
    EngineersArchitects,
    /// TC05 — Notaries' national fund.
    Notaries,
    /// TC06 — Bookkeepers' and commercial experts' fund.
    Bookkeepers,
    /// TC07 — ENASARCO (commercial agents).
    Enasarco,
    /// TC08 — ENPACL (labour consultants).
    Enpacl,
    /// TC09 — ENPAM (physicians).
    Enpam,
    /// TC10 — ENPAF (pharmacists).
    Enpaf,
    /// TC11 — ENPAV (veterinarians).
    Enpav,
    /// TC12 — ENPAIA (agricultural employees).
    Enpaia,
    /// TC13 — Shipping and maritime agencies employees' fund.
    ShippingAgents,
    /// TC14 — INPGI (journalists).
    Inpgi,
    /// TC15 — ONAOSI (orphans of health workers).
    Onaosi,
    /// TC16 — CASAGIT (journalists' supplementary fund).
    Casagit,
    /// TC17 — EPPI (industrial experts).
    Eppi,
    /// TC18 — EPAP (multi-category fund).
    Epap,
    /// TC19 — ENPAB (biologists).
    Enpab,
    /// TC20 — ENPAPI (nurses).
    Enpapi,
    /// TC21 — ENPAP (psychologists).
    Psychologists,
    /// TC22 — INPS.
    Inps,
}

impl PensionFund {
    /// Four-character TC code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Lawyers => "TC01",
            Self::Accountants => "TC02",
            Self::Surveyors => "TC03",
            Self::EngineersArchitects => "TC04",
            Self::Notaries => "TC05",
            Self::Bookkeepers => "TC06",
            Self::Enasarco => "TC07",
            Self::Enpacl => "TC08",
            Self::Enpam => "TC09",
            Self::Enpaf => "TC10",
            Self::Enpav => "TC11",
            Self::Enpaia => "TC12",
            Self::ShippingAgents => "TC13",
            Self::Inpgi => "TC14",
            Self::Onaosi => "TC15",
            Self::Casagit => "TC16",
            Self::Eppi => "TC17",
            Self::Epap => "TC18",
            Self::Enpab => "TC19",
            Self::Enpapi => "TC20",
            Self::Psychologists => "TC21",
            Self::Inps => "TC22",
        }
    }

    /// Parse from a TC code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "TC01" => Some(Self::Lawyers),
            "TC02" => Some(Self::Accountants),
            "TC03" => Some(Self::Surveyors),
            "TC04" => Some(Self::EngineersArchitects),
            "TC05" => Some(Self::Notaries),
            "TC06" => Some(Self::Bookkeepers),
            "TC07" => Some(Self::Enasarco),
            "TC08" => Some(Self::Enpacl),
            "TC09" => Some(Self::Enpam),
            "TC10" => Some(Self::Enpaf),
            "TC11" => Some(Self::Enpav),
            "TC12" => Some(Self::Enpaia),
            "TC13" => Some(Self::ShippingAgents),
            "TC14" => Some(Self::Inpgi),
            "TC15" => Some(Self::Onaosi),
            "TC16" => Some(Self::Casagit),
            "TC17" => Some(Self::Eppi),
            "TC18" => Some(Self::Epap),
            "TC19" => Some(Self::Enpab),
            "TC20" => Some(Self::Enpapi),
            "TC21" => Some(Self::Psychologists),
            "TC22" => Some(Self::Inps),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_type_codes_round_trip() {
        for dt in [
            DocumentType::Invoice,
            DocumentType::CreditNote,
            DocumentType::FeeNote,
            DocumentType::SelfBilledRegularization,
            DocumentType::DeferredInvoice,
            DocumentType::SanMarinoPurchase,
        ] {
            assert_eq!(DocumentType::from_code(dt.code()), Some(dt));
        }
        assert_eq!(DocumentType::from_code("TD99"), None);
        assert_eq!(DocumentType::from_code(""), None);
    }

    #[test]
    fn retired_regime_rejected() {
        assert_eq!(FiscalRegime::from_code("RF03"), None);
        assert_eq!(FiscalRegime::from_code("RF01"), Some(FiscalRegime::Ordinary));
        assert_eq!(FiscalRegime::from_code("RF19"), Some(FiscalRegime::FlatRate));
    }

    #[test]
    fn nature_codes_round_trip() {
        for n in [
            NatureCode::Excluded,
            NatureCode::NotSubjectArt7,
            NatureCode::NonTaxableExport,
            NatureCode::Exempt,
            NatureCode::ReverseChargeScrap,
            NatureCode::ReverseChargeOther,
            NatureCode::VatPaidInOtherEuState,
        ] {
            assert_eq!(NatureCode::from_code(n.code()), Some(n));
        }
        // Bare N2/N3/N6 were split into sub-codes and are no longer valid.
        assert_eq!(NatureCode::from_code("N2"), None);
        assert_eq!(NatureCode::from_code("N6"), None);
    }

    #[test]
    fn routing_code_forms() {
        let channel = RecipientRouting::Channel("ABC1234".into());
        assert_eq!(channel.code(), "ABC1234");
        assert_eq!(channel.certified_email(), None);

        let pec = RecipientRouting::CertifiedEmail("fatture@pec.example.it".into());
        assert_eq!(pec.code(), "0000000");
        assert_eq!(pec.certified_email(), Some("fatture@pec.example.it"));

        assert_eq!(RecipientRouting::Foreign.code(), "XXXXXXX");
    }

    #[test]
    fn payment_method_registry_is_closed() {
        assert_eq!(PaymentMethod::from_code("MP05"), Some(PaymentMethod::BankTransfer));
        assert_eq!(PaymentMethod::from_code("MP23"), Some(PaymentMethod::PagoPa));
        assert_eq!(PaymentMethod::from_code("MP24"), None);
        assert_eq!(PaymentMethod::from_code("MP00"), None);
    }
}
