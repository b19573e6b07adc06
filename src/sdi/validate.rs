use std::collections::HashSet;

use chrono::NaiveDate;
use quick_xml::Reader;
use quick_xml::events::Event;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::TransmissionFormat;
use crate::core::*;

/// Outcome of validating a raw document: valid, or every rule violation
/// found across all layers.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a raw FatturaPA document.
///
/// Errors accumulate across all layers — structural, header, body,
/// cross-field — rather than stopping at the first violation. A document
/// that cannot be parsed as a balanced tree only reports its structural
/// defects; there is nothing further to check.
pub fn validate(xml: &str) -> ValidationReport {
    let mut errors = Vec::new();

    // Layer 1: raw-text structural checks.
    if !xml.trim_start().starts_with("<?xml") {
        errors.push(ValidationError::new(
            "/",
            "missing XML declaration",
        ));
    }
    if let Some(c) = xml
        .chars()
        .find(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r'))
    {
        errors.push(ValidationError::new(
            "/",
            format!("control character U+{:04X} is not allowed", c as u32),
        ));
    }

    let parsed = match parse_document(xml) {
        Ok(parsed) => parsed,
        Err(structural) => {
            errors.push(structural);
            return ValidationReport { errors };
        }
    };

    // Layers 2-4 need the header tree.
    if parsed.has_header {
        check_transmission(&parsed, &mut errors);
        check_issuer(&parsed.issuer, &mut errors);
        check_recipient(&parsed.recipient, &mut errors);
    } else {
        errors.push(ValidationError::new(
            "FatturaElettronica/FatturaElettronicaHeader",
            "header section is missing",
        ));
    }

    // Layers 5-8 need the body tree.
    if parsed.has_body {
        check_general_data(&parsed, &mut errors);
        check_lines(&parsed.lines, &mut errors);
        check_summaries(&parsed, &mut errors);
        check_payments(&parsed.payments, &mut errors);
    } else {
        errors.push(ValidationError::new(
            "FatturaElettronica/FatturaElettronicaBody",
            "body section is missing",
        ));
    }

    ValidationReport { errors }
}

/// Convenience wrapper returning only the verdict.
pub fn quick_validate(xml: &str) -> bool {
    validate(xml).is_valid()
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ParsedDocument {
    versione: Option<String>,
    has_header: bool,
    has_body: bool,

    // DatiTrasmissione
    transmitter_country: Option<String>,
    transmitter_code: Option<String>,
    progressivo: Option<String>,
    formato: Option<String>,
    codice_destinatario: Option<String>,
    pec: Option<String>,

    issuer: ParsedParty,
    recipient: ParsedParty,

    // DatiGeneraliDocumento
    tipo_documento: Option<String>,
    data: Option<String>,
    numero: Option<String>,

    lines: Vec<ParsedLine>,
    current_line: Option<ParsedLine>,

    summaries: Vec<ParsedSummary>,
    current_summary: Option<ParsedSummary>,

    payments: Vec<ParsedPayment>,
    current_payment: Option<ParsedPayment>,
    current_detail: Option<ParsedPaymentDetail>,
}

#[derive(Default)]
struct ParsedParty {
    vat_country: Option<String>,
    vat_code: Option<String>,
    fiscal_code: Option<String>,
    business_name: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    regime: Option<String>,
    street: Option<String>,
    postal_code: Option<String>,
    municipality: Option<String>,
    province: Option<String>,
    country: Option<String>,
}

#[derive(Default)]
struct ParsedLine {
    number: Option<String>,
    description: Option<String>,
    vat_rate: Option<String>,
    nature: Option<String>,
}

#[derive(Default)]
struct ParsedSummary {
    vat_rate: Option<String>,
    nature: Option<String>,
    liability: Option<String>,
}

#[derive(Default)]
struct ParsedPayment {
    terms: Option<String>,
    details: Vec<ParsedPaymentDetail>,
}

#[derive(Default)]
struct ParsedPaymentDetail {
    method: Option<String>,
    iban: Option<String>,
}

/// Parse the document tree with a streaming reader. Returns a structural
/// `ValidationError` when the tree is not well-formed.
fn parse_document(xml: &str) -> Result<ParsedDocument, ValidationError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut parsed = ParsedDocument::default();
    let mut path: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = local_name(e.name().as_ref());
                if name == "FatturaElettronica" {
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"versione" {
                            parsed.versione =
                                Some(String::from_utf8_lossy(&attr.value).into_owned());
                        }
                    }
                }
                parsed.enter(&name);
                path.push(name);
            }
            Ok(Event::Empty(ref e)) => {
                let name = local_name(e.name().as_ref());
                parsed.enter(&name);
                parsed.leave(&name);
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().unwrap_or_default().to_string();
                if !text.is_empty() {
                    parsed.handle_text(&path, &text);
                }
            }
            Ok(Event::End(_)) => {
                let ended = path.pop().unwrap_or_default();
                parsed.leave(&ended);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ValidationError::new(
                    path.join("/"),
                    format!("malformed XML: {e}"),
                ));
            }
            _ => {}
        }
    }

    if let Some(open) = path.last() {
        return Err(ValidationError::new(
            path.join("/"),
            format!("unclosed element '{open}'"),
        ));
    }

    Ok(parsed)
}

/// Element name with any namespace prefix stripped.
fn local_name(raw: &[u8]) -> String {
    let name = String::from_utf8_lossy(raw).into_owned();
    match name.rsplit_once(':') {
        Some((_, local)) => local.to_string(),
        None => name,
    }
}

fn in_context(path: &[String], name: &str) -> bool {
    path.iter().any(|p| p == name)
}

impl ParsedDocument {
    fn enter(&mut self, name: &str) {
        match name {
            "FatturaElettronicaHeader" => self.has_header = true,
            "FatturaElettronicaBody" => self.has_body = true,
            "DettaglioLinee" => self.current_line = Some(ParsedLine::default()),
            "DatiRiepilogo" => self.current_summary = Some(ParsedSummary::default()),
            "DatiPagamento" => self.current_payment = Some(ParsedPayment::default()),
            "DettaglioPagamento" => self.current_detail = Some(ParsedPaymentDetail::default()),
            _ => {}
        }
    }

    fn leave(&mut self, name: &str) {
        match name {
            "DettaglioLinee" => {
                if let Some(line) = self.current_line.take() {
                    self.lines.push(line);
                }
            }
            "DatiRiepilogo" => {
                if let Some(summary) = self.current_summary.take() {
                    self.summaries.push(summary);
                }
            }
            "DettaglioPagamento" => {
                if let (Some(detail), Some(payment)) =
                    (self.current_detail.take(), self.current_payment.as_mut())
                {
                    payment.details.push(detail);
                }
            }
            "DatiPagamento" => {
                if let Some(payment) = self.current_payment.take() {
                    self.payments.push(payment);
                }
            }
            _ => {}
        }
    }

    fn handle_text(&mut self, path: &[String], text: &str) {
        let Some(last) = path.last() else { return };
        let last = last.as_str();

        // Line and summary contexts first — they reuse element names
        // (AliquotaIVA, Natura) that also appear elsewhere.
        if in_context(path, "DettaglioLinee") {
            if let Some(line) = self.current_line.as_mut() {
                match last {
                    "NumeroLinea" => line.number = Some(text.into()),
                    "Descrizione" => line.description = Some(text.into()),
                    "AliquotaIVA" => line.vat_rate = Some(text.into()),
                    "Natura" => line.nature = Some(text.into()),
                    _ => {}
                }
            }
            return;
        }
        if in_context(path, "DatiRiepilogo") {
            if let Some(summary) = self.current_summary.as_mut() {
                match last {
                    "AliquotaIVA" => summary.vat_rate = Some(text.into()),
                    "Natura" => summary.nature = Some(text.into()),
                    "EsigibilitaIVA" => summary.liability = Some(text.into()),
                    _ => {}
                }
            }
            return;
        }
        if in_context(path, "DatiCassaPrevidenziale") {
            return;
        }

        if in_context(path, "DatiTrasmissione") {
            match last {
                "IdPaese" => self.transmitter_country = Some(text.into()),
                "IdCodice" => self.transmitter_code = Some(text.into()),
                "ProgressivoInvio" => self.progressivo = Some(text.into()),
                "FormatoTrasmissione" => self.formato = Some(text.into()),
                "CodiceDestinatario" => self.codice_destinatario = Some(text.into()),
                "PECDestinatario" => self.pec = Some(text.into()),
                _ => {}
            }
            return;
        }

        if in_context(path, "CedentePrestatore") {
            self.issuer.handle_text(path, last, text);
            return;
        }
        if in_context(path, "CessionarioCommittente") {
            self.recipient.handle_text(path, last, text);
            return;
        }

        if in_context(path, "DettaglioPagamento") {
            if let Some(detail) = self.current_detail.as_mut() {
                match last {
                    "ModalitaPagamento" => detail.method = Some(text.into()),
                    "IBAN" => detail.iban = Some(text.into()),
                    _ => {}
                }
            }
            return;
        }
        if in_context(path, "DatiPagamento") {
            if last == "CondizioniPagamento" {
                if let Some(payment) = self.current_payment.as_mut() {
                    payment.terms = Some(text.into());
                }
            }
            return;
        }

        if in_context(path, "DatiGeneraliDocumento") {
            match last {
                "TipoDocumento" => self.tipo_documento = Some(text.into()),
                "Data" => self.data = Some(text.into()),
                "Numero" => self.numero = Some(text.into()),
                _ => {}
            }
        }
    }
}

impl ParsedParty {
    fn handle_text(&mut self, path: &[String], last: &str, text: &str) {
        if in_context(path, "IdFiscaleIVA") {
            match last {
                "IdPaese" => self.vat_country = Some(text.into()),
                "IdCodice" => self.vat_code = Some(text.into()),
                _ => {}
            }
            return;
        }
        if in_context(path, "Sede") {
            match last {
                "Indirizzo" => self.street = Some(text.into()),
                "CAP" => self.postal_code = Some(text.into()),
                "Comune" => self.municipality = Some(text.into()),
                "Provincia" => self.province = Some(text.into()),
                "Nazione" => self.country = Some(text.into()),
                _ => {}
            }
            return;
        }
        match last {
            "CodiceFiscale" => self.fiscal_code = Some(text.into()),
            "Denominazione" => self.business_name = Some(text.into()),
            "Nome" => self.first_name = Some(text.into()),
            "Cognome" => self.last_name = Some(text.into()),
            "RegimeFiscale" => self.regime = Some(text.into()),
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Rule layers
// ---------------------------------------------------------------------------

const TRANSMISSION_PATH: &str = "FatturaElettronicaHeader/DatiTrasmissione";
const ISSUER_PATH: &str = "FatturaElettronicaHeader/CedentePrestatore";
const RECIPIENT_PATH: &str = "FatturaElettronicaHeader/CessionarioCommittente";
const GENERAL_PATH: &str = "FatturaElettronicaBody/DatiGenerali/DatiGeneraliDocumento";
const GOODS_PATH: &str = "FatturaElettronicaBody/DatiBeniServizi";

fn check_transmission(parsed: &ParsedDocument, errors: &mut Vec<ValidationError>) {
    match parsed.transmitter_country.as_deref() {
        None => errors.push(ValidationError::new(
            format!("{TRANSMISSION_PATH}/IdTrasmittente/IdPaese"),
            "transmitter country code is missing",
        )),
        Some(country) if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) => {
            errors.push(ValidationError::new(
                format!("{TRANSMISSION_PATH}/IdTrasmittente/IdPaese"),
                format!("'{country}' is not a 2-letter country code"),
            ));
        }
        _ => {}
    }

    match parsed.transmitter_code.as_deref() {
        None => errors.push(ValidationError::new(
            format!("{TRANSMISSION_PATH}/IdTrasmittente/IdCodice"),
            "transmitter code is missing",
        )),
        Some(code) if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) => {
            errors.push(ValidationError::new(
                format!("{TRANSMISSION_PATH}/IdTrasmittente/IdCodice"),
                format!("transmitter code '{code}' must be numeric"),
            ));
        }
        _ => {}
    }

    if parsed
        .progressivo
        .as_deref()
        .is_none_or(|p| p.trim().is_empty())
    {
        errors.push(ValidationError::new(
            format!("{TRANSMISSION_PATH}/ProgressivoInvio"),
            "transmission sequence is missing",
        ));
    }

    let declared = parsed
        .versione
        .as_deref()
        .or(parsed.formato.as_deref());
    let profile = declared.and_then(TransmissionFormat::from_code);
    match declared {
        None => errors.push(ValidationError::new(
            format!("{TRANSMISSION_PATH}/FormatoTrasmissione"),
            "transmission format is missing",
        )),
        Some(code) if profile.is_none() => errors.push(ValidationError::new(
            format!("{TRANSMISSION_PATH}/FormatoTrasmissione"),
            format!("'{code}' is not a registered transmission format"),
        )),
        _ => {}
    }
    if let (Some(versione), Some(formato)) = (parsed.versione.as_deref(), parsed.formato.as_deref())
    {
        if versione != formato {
            errors.push(ValidationError::new(
                format!("{TRANSMISSION_PATH}/FormatoTrasmissione"),
                format!(
                    "transmission format '{formato}' does not match the versione attribute '{versione}'"
                ),
            ));
        }
    }

    match parsed.codice_destinatario.as_deref() {
        None => errors.push(ValidationError::new(
            format!("{TRANSMISSION_PATH}/CodiceDestinatario"),
            "routing code is missing",
        )),
        Some(code) => {
            if let Some(profile) = profile {
                let expected = profile.routing_code_len();
                if code.len() != expected {
                    errors.push(ValidationError::new(
                        format!("{TRANSMISSION_PATH}/CodiceDestinatario"),
                        format!(
                            "routing code must be {expected} characters for {} documents, got {}",
                            profile.code(),
                            code.len()
                        ),
                    ));
                }
            }
            if code == ROUTING_PEC_SENTINEL
                && parsed.pec.as_deref().is_none_or(|p| p.trim().is_empty())
            {
                errors.push(ValidationError::new(
                    format!("{TRANSMISSION_PATH}/PECDestinatario"),
                    "certified-email routing (all-zero code) requires a PEC address",
                ));
            }
        }
    }
}

fn check_issuer(issuer: &ParsedParty, errors: &mut Vec<ValidationError>) {
    check_identity(issuer, ISSUER_PATH, errors);

    match issuer.regime.as_deref() {
        None => errors.push(ValidationError::new(
            format!("{ISSUER_PATH}/DatiAnagrafici/RegimeFiscale"),
            "fiscal regime is missing",
        )),
        Some(code) if FiscalRegime::from_code(code).is_none() => {
            errors.push(ValidationError::new(
                format!("{ISSUER_PATH}/DatiAnagrafici/RegimeFiscale"),
                format!("'{code}' is not a registered fiscal regime code"),
            ));
        }
        _ => {}
    }

    match issuer.vat_code.as_deref() {
        None => errors.push(ValidationError::new(
            format!("{ISSUER_PATH}/DatiAnagrafici/IdFiscaleIVA/IdCodice"),
            "VAT number is missing",
        )),
        Some(code) => {
            if issuer.vat_country.as_deref() == Some("IT") && !is_valid_vat_number(code) {
                errors.push(ValidationError::new(
                    format!("{ISSUER_PATH}/DatiAnagrafici/IdFiscaleIVA/IdCodice"),
                    format!("'{code}' fails the Italian VAT number checksum"),
                ));
            }
        }
    }

    check_address_block(issuer, ISSUER_PATH, errors);
}

fn check_recipient(recipient: &ParsedParty, errors: &mut Vec<ValidationError>) {
    check_identity(recipient, RECIPIENT_PATH, errors);

    if recipient.vat_code.is_none() && recipient.fiscal_code.is_none() {
        errors.push(ValidationError::new(
            format!("{RECIPIENT_PATH}/DatiAnagrafici"),
            "recipient needs a VAT number or a fiscal code",
        ));
    }
    if let Some(code) = recipient.vat_code.as_deref() {
        if recipient.vat_country.as_deref() == Some("IT") && !is_valid_vat_number(code) {
            errors.push(ValidationError::new(
                format!("{RECIPIENT_PATH}/DatiAnagrafici/IdFiscaleIVA/IdCodice"),
                format!("'{code}' fails the Italian VAT number checksum"),
            ));
        }
    }
    if let Some(code) = recipient.fiscal_code.as_deref() {
        if !is_plausible_fiscal_code(code) {
            errors.push(ValidationError::new(
                format!("{RECIPIENT_PATH}/DatiAnagrafici/CodiceFiscale"),
                format!("'{code}' is not a plausible fiscal code"),
            ));
        }
    }

    check_address_block(recipient, RECIPIENT_PATH, errors);
}

fn check_identity(party: &ParsedParty, path: &str, errors: &mut Vec<ValidationError>) {
    let has_company = party.business_name.is_some();
    let has_person = party.first_name.is_some() || party.last_name.is_some();

    if !has_company && !has_person {
        errors.push(ValidationError::new(
            format!("{path}/DatiAnagrafici/Anagrafica"),
            "either a business name or a first and last name is required",
        ));
    } else if has_company && has_person {
        errors.push(ValidationError::new(
            format!("{path}/DatiAnagrafici/Anagrafica"),
            "business name and personal name are mutually exclusive",
        ));
    } else if has_person && (party.first_name.is_none() || party.last_name.is_none()) {
        errors.push(ValidationError::new(
            format!("{path}/DatiAnagrafici/Anagrafica"),
            "a natural person needs both first and last name",
        ));
    }
}

fn check_address_block(party: &ParsedParty, path: &str, errors: &mut Vec<ValidationError>) {
    if party.street.as_deref().is_none_or(|s| s.trim().is_empty()) {
        errors.push(ValidationError::new(
            format!("{path}/Sede/Indirizzo"),
            "street is missing",
        ));
    }

    match party.postal_code.as_deref() {
        None => errors.push(ValidationError::new(
            format!("{path}/Sede/CAP"),
            "postal code is missing",
        )),
        Some(cap) if cap.len() != 5 || !cap.bytes().all(|b| b.is_ascii_digit()) => {
            errors.push(ValidationError::new(
                format!("{path}/Sede/CAP"),
                format!("postal code '{cap}' must be exactly 5 digits"),
            ));
        }
        _ => {}
    }

    if party
        .municipality
        .as_deref()
        .is_none_or(|m| m.trim().is_empty())
    {
        errors.push(ValidationError::new(
            format!("{path}/Sede/Comune"),
            "municipality is missing",
        ));
    }

    match party.country.as_deref() {
        None => errors.push(ValidationError::new(
            format!("{path}/Sede/Nazione"),
            "country code is missing",
        )),
        Some(country) if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) => {
            errors.push(ValidationError::new(
                format!("{path}/Sede/Nazione"),
                format!("'{country}' is not a 2-letter country code"),
            ));
        }
        Some("IT") => match party.province.as_deref() {
            None => errors.push(ValidationError::new(
                format!("{path}/Sede/Provincia"),
                "province is required for Italian addresses",
            )),
            Some(province) if !is_known_province_code(province) => {
                errors.push(ValidationError::new(
                    format!("{path}/Sede/Provincia"),
                    format!("'{province}' is not a known province code"),
                ));
            }
            _ => {}
        },
        _ => {}
    }
}

fn check_general_data(parsed: &ParsedDocument, errors: &mut Vec<ValidationError>) {
    match parsed.tipo_documento.as_deref() {
        None => errors.push(ValidationError::new(
            format!("{GENERAL_PATH}/TipoDocumento"),
            "document type is missing",
        )),
        Some(code) if DocumentType::from_code(code).is_none() => {
            errors.push(ValidationError::new(
                format!("{GENERAL_PATH}/TipoDocumento"),
                format!("'{code}' is not a registered document type"),
            ));
        }
        _ => {}
    }

    match parsed.data.as_deref() {
        None => errors.push(ValidationError::new(
            format!("{GENERAL_PATH}/Data"),
            "issue date is missing",
        )),
        Some(date) if !is_iso_date(date) => {
            errors.push(ValidationError::new(
                format!("{GENERAL_PATH}/Data"),
                format!("'{date}' is not a calendar date in YYYY-MM-DD form"),
            ));
        }
        _ => {}
    }

    if parsed.numero.as_deref().is_none_or(|n| n.trim().is_empty()) {
        errors.push(ValidationError::new(
            format!("{GENERAL_PATH}/Numero"),
            "document number is missing",
        ));
    }
}

fn is_iso_date(s: &str) -> bool {
    let b = s.as_bytes();
    s.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && [0, 1, 2, 3, 5, 6, 8, 9].iter().all(|&i| b[i].is_ascii_digit())
        && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

fn check_lines(lines: &[ParsedLine], errors: &mut Vec<ValidationError>) {
    if lines.is_empty() {
        errors.push(ValidationError::new(
            format!("{GOODS_PATH}/DettaglioLinee"),
            "at least one line item is required",
        ));
        return;
    }

    let mut seen = HashSet::new();
    for (i, line) in lines.iter().enumerate() {
        let path = format!("{GOODS_PATH}/DettaglioLinee[{}]", i + 1);

        match line.number.as_deref().map(str::parse::<u32>) {
            None => errors.push(ValidationError::new(
                format!("{path}/NumeroLinea"),
                "line number is missing",
            )),
            Some(Err(_)) | Some(Ok(0)) => errors.push(ValidationError::new(
                format!("{path}/NumeroLinea"),
                format!(
                    "line number '{}' must be a positive integer",
                    line.number.as_deref().unwrap_or_default()
                ),
            )),
            Some(Ok(number)) => {
                if !seen.insert(number) {
                    errors.push(ValidationError::new(
                        format!("{path}/NumeroLinea"),
                        format!("duplicate line number {number}"),
                    ));
                }
            }
        }

        if line
            .description
            .as_deref()
            .is_none_or(|d| d.trim().is_empty())
        {
            errors.push(ValidationError::new(
                format!("{path}/Descrizione"),
                "description is missing",
            ));
        }

        match line.vat_rate.as_deref().map(Decimal::from_str) {
            None => errors.push(ValidationError::new(
                format!("{path}/AliquotaIVA"),
                "VAT rate is missing",
            )),
            Some(Err(_)) => errors.push(ValidationError::new(
                format!("{path}/AliquotaIVA"),
                format!(
                    "VAT rate '{}' is not a decimal number",
                    line.vat_rate.as_deref().unwrap_or_default()
                ),
            )),
            Some(Ok(rate)) => {
                if rate.is_zero() && line.nature.is_none() {
                    errors.push(ValidationError::new(
                        format!("{path}/Natura"),
                        "a nature code is required when the VAT rate is zero",
                    ));
                }
            }
        }

        if let Some(nature) = line.nature.as_deref() {
            if NatureCode::from_code(nature).is_none() {
                errors.push(ValidationError::new(
                    format!("{path}/Natura"),
                    format!("'{nature}' is not a registered nature code"),
                ));
            }
        }
    }
}

fn check_summaries(parsed: &ParsedDocument, errors: &mut Vec<ValidationError>) {
    if parsed.summaries.is_empty() {
        errors.push(ValidationError::new(
            format!("{GOODS_PATH}/DatiRiepilogo"),
            "at least one VAT summary is required",
        ));
        return;
    }

    let mut summary_keys = HashSet::new();
    for (i, summary) in parsed.summaries.iter().enumerate() {
        let path = format!("{GOODS_PATH}/DatiRiepilogo[{}]", i + 1);

        match summary.vat_rate.as_deref().map(Decimal::from_str) {
            None => errors.push(ValidationError::new(
                format!("{path}/AliquotaIVA"),
                "VAT rate is missing",
            )),
            Some(Err(_)) => errors.push(ValidationError::new(
                format!("{path}/AliquotaIVA"),
                format!(
                    "VAT rate '{}' is not a decimal number",
                    summary.vat_rate.as_deref().unwrap_or_default()
                ),
            )),
            Some(Ok(rate)) => {
                if rate.is_zero() && summary.nature.is_none() {
                    errors.push(ValidationError::new(
                        format!("{path}/Natura"),
                        "a nature code is required when the VAT rate is zero",
                    ));
                }
                summary_keys.insert(rate_key(rate, summary.nature.as_deref()));
            }
        }

        if let Some(nature) = summary.nature.as_deref() {
            if NatureCode::from_code(nature).is_none() {
                errors.push(ValidationError::new(
                    format!("{path}/Natura"),
                    format!("'{nature}' is not a registered nature code"),
                ));
            }
        }

        if let Some(liability) = summary.liability.as_deref() {
            if VatLiability::from_code(liability).is_none() {
                errors.push(ValidationError::new(
                    format!("{path}/EsigibilitaIVA"),
                    format!("'{liability}' is not a registered VAT liability code"),
                ));
            }
        }
    }

    // Cross-field consistency: every (rate, nature) pair used by a line
    // must have a matching summary row.
    for (i, line) in parsed.lines.iter().enumerate() {
        let Some(Ok(rate)) = line.vat_rate.as_deref().map(Decimal::from_str) else {
            continue;
        };
        let key = rate_key(rate, line.nature.as_deref());
        if !summary_keys.contains(&key) {
            let line_ref = line
                .number
                .clone()
                .unwrap_or_else(|| (i + 1).to_string());
            let nature_note = line
                .nature
                .as_deref()
                .map(|n| format!(" and nature {n}"))
                .unwrap_or_default();
            errors.push(ValidationError::new(
                format!("{GOODS_PATH}/DatiRiepilogo"),
                format!(
                    "line {line_ref} uses VAT rate {}{nature_note} but no summary row covers it",
                    rate.normalize()
                ),
            ));
        }
    }
}

/// Normalized (rate, nature) key for cross-field matching: "22.00" and
/// "22" are the same rate.
fn rate_key(rate: Decimal, nature: Option<&str>) -> (String, String) {
    (
        rate.normalize().to_string(),
        nature.unwrap_or_default().to_string(),
    )
}

fn check_payments(payments: &[ParsedPayment], errors: &mut Vec<ValidationError>) {
    for (i, payment) in payments.iter().enumerate() {
        let path = format!("FatturaElettronicaBody/DatiPagamento[{}]", i + 1);

        match payment.terms.as_deref() {
            None => errors.push(ValidationError::new(
                format!("{path}/CondizioniPagamento"),
                "payment terms are missing",
            )),
            Some(code) if PaymentTerms::from_code(code).is_none() => {
                errors.push(ValidationError::new(
                    format!("{path}/CondizioniPagamento"),
                    format!("'{code}' is not a registered payment terms code"),
                ));
            }
            _ => {}
        }

        for (j, detail) in payment.details.iter().enumerate() {
            let detail_path = format!("{path}/DettaglioPagamento[{}]", j + 1);

            match detail.method.as_deref() {
                None => errors.push(ValidationError::new(
                    format!("{detail_path}/ModalitaPagamento"),
                    "payment method is missing",
                )),
                Some(code) if PaymentMethod::from_code(code).is_none() => {
                    errors.push(ValidationError::new(
                        format!("{detail_path}/ModalitaPagamento"),
                        format!("'{code}' is not a registered payment method code"),
                    ));
                }
                _ => {}
            }

            if let Some(iban) = detail.iban.as_deref() {
                if let Err(e) = validate_iban(iban) {
                    errors.push(ValidationError::new(
                        format!("{detail_path}/IBAN"),
                        e.to_string(),
                    ));
                }
            }
        }
    }
}
