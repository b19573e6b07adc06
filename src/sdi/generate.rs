use crate::core::*;

use super::xml_utils::XmlWriter;
use super::{FATTURA_NS, MAX_DESCRIPTION_LEN, TransmissionFormat};

/// A successfully generated document: the serialized XML and the file
/// name under which it must be transmitted.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub xml: String,
    pub file_name: String,
}

/// Generate the FatturaPA XML for an invoice document.
///
/// Runs the pre-flight business-rule checks first; if any fail, returns
/// [`FatturaError::Preflight`] with every violation and no output — a
/// partial document is never produced. Formatting concerns (oversized
/// descriptions, XML special characters) are normalized, not rejected.
pub fn generate(
    invoice: &InvoiceDocument,
    transmission_sequence: &str,
) -> Result<GeneratedDocument, FatturaError> {
    let errors = preflight(invoice);
    if !errors.is_empty() {
        return Err(FatturaError::Preflight(errors));
    }

    let format = transmission_format(&invoice.recipient.routing);
    let xml = write_document(invoice, transmission_sequence, format)?;

    // Pre-flight guarantees the VAT number is present.
    let issuer_vat = invoice.issuer.vat_number.as_deref().unwrap_or_default();
    let file_name = generate_file_name(issuer_vat, transmission_sequence);

    Ok(GeneratedDocument { xml, file_name })
}

/// Derive the transmission file name:
/// `IT` + VAT number zero-padded to 11 digits + `_` + progressive id
/// uppercased and truncated/zero-padded to 5 characters + `.xml`.
pub fn generate_file_name(issuer_vat: &str, progressive_id: &str) -> String {
    let progressive: String = progressive_id.to_uppercase().chars().take(5).collect();
    format!("IT{issuer_vat:0>11}_{progressive:0>5}.xml")
}

/// The document profile selected by the recipient's routing form.
fn transmission_format(routing: &RecipientRouting) -> TransmissionFormat {
    match routing {
        RecipientRouting::PublicAdministration(_) => TransmissionFormat::PublicAdministration,
        _ => TransmissionFormat::Private,
    }
}

/// Pre-flight business-rule checks. Returns every violation found.
fn preflight(invoice: &InvoiceDocument) -> Vec<String> {
    let mut errors = Vec::new();

    if invoice
        .issuer
        .vat_number
        .as_deref()
        .is_none_or(|v| v.trim().is_empty())
    {
        errors.push("issuer VAT number is missing".to_string());
    }
    if invoice.issuer.fiscal_regime.is_none() {
        errors.push("issuer fiscal regime is missing".to_string());
    }

    check_address(&invoice.issuer.address, "issuer", &mut errors);

    if invoice.recipient.vat_number.is_none() && invoice.recipient.fiscal_code.is_none() {
        errors.push("recipient needs a VAT number or a fiscal code".to_string());
    }

    if invoice.number.trim().is_empty() {
        errors.push("document number must not be empty".to_string());
    }
    if invoice.lines.is_empty() {
        errors.push("at least one line item is required".to_string());
    }
    if invoice.vat_summaries.is_empty() {
        errors.push("at least one VAT summary is required".to_string());
    }

    errors
}

fn check_address(address: &Address, who: &str, errors: &mut Vec<String>) {
    if address.street.trim().is_empty() {
        errors.push(format!("{who} address: street is missing"));
    }
    if address.postal_code.trim().is_empty() {
        errors.push(format!("{who} address: postal code is missing"));
    }
    if address.municipality.trim().is_empty() {
        errors.push(format!("{who} address: municipality is missing"));
    }
    if address.is_domestic()
        && address
            .province
            .as_deref()
            .is_none_or(|p| p.trim().is_empty())
    {
        errors.push(format!(
            "{who} address: province is required for Italian addresses"
        ));
    }
}

fn write_document(
    invoice: &InvoiceDocument,
    transmission_sequence: &str,
    format: TransmissionFormat,
) -> Result<String, FatturaError> {
    let mut w = XmlWriter::new()?;

    w.start_element_with_attrs(
        "p:FatturaElettronica",
        &[("versione", format.code()), ("xmlns:p", FATTURA_NS)],
    )?;

    write_header(&mut w, invoice, transmission_sequence, format)?;
    write_body(&mut w, invoice)?;

    w.end_element("p:FatturaElettronica")?;
    w.into_string()
}

fn write_header(
    w: &mut XmlWriter,
    invoice: &InvoiceDocument,
    transmission_sequence: &str,
    format: TransmissionFormat,
) -> Result<(), FatturaError> {
    let issuer = &invoice.issuer;
    let recipient = &invoice.recipient;

    w.start_element("FatturaElettronicaHeader")?;

    // 1.1: DatiTrasmissione
    w.start_element("DatiTrasmissione")?;
    w.start_element("IdTrasmittente")?;
    w.text_element("IdPaese", &issuer.address.country)?;
    w.text_element("IdCodice", issuer.vat_number.as_deref().unwrap_or_default())?;
    w.end_element("IdTrasmittente")?;
    w.text_element("ProgressivoInvio", transmission_sequence)?;
    w.text_element("FormatoTrasmissione", format.code())?;
    w.text_element("CodiceDestinatario", recipient.routing.code())?;
    if let Some(pec) = recipient.routing.certified_email() {
        w.text_element("PECDestinatario", pec)?;
    }
    w.end_element("DatiTrasmissione")?;

    // 1.2: CedentePrestatore
    w.start_element("CedentePrestatore")?;
    w.start_element("DatiAnagrafici")?;
    w.start_element("IdFiscaleIVA")?;
    w.text_element("IdPaese", &issuer.address.country)?;
    w.text_element("IdCodice", issuer.vat_number.as_deref().unwrap_or_default())?;
    w.end_element("IdFiscaleIVA")?;
    if let Some(cf) = &issuer.fiscal_code {
        w.text_element("CodiceFiscale", cf)?;
    }
    write_identity(w, &issuer.identity)?;
    if let Some(regime) = issuer.fiscal_regime {
        w.text_element("RegimeFiscale", regime.code())?;
    }
    w.end_element("DatiAnagrafici")?;
    write_address(w, &issuer.address)?;
    w.end_element("CedentePrestatore")?;

    // 1.4: CessionarioCommittente
    w.start_element("CessionarioCommittente")?;
    w.start_element("DatiAnagrafici")?;
    if let Some(vat) = &recipient.vat_number {
        w.start_element("IdFiscaleIVA")?;
        w.text_element("IdPaese", &recipient.address.country)?;
        w.text_element("IdCodice", vat)?;
        w.end_element("IdFiscaleIVA")?;
    }
    if let Some(cf) = &recipient.fiscal_code {
        w.text_element("CodiceFiscale", cf)?;
    }
    write_identity(w, &recipient.identity)?;
    w.end_element("DatiAnagrafici")?;
    write_address(w, &recipient.address)?;
    w.end_element("CessionarioCommittente")?;

    w.end_element("FatturaElettronicaHeader")?;
    Ok(())
}

fn write_identity(w: &mut XmlWriter, identity: &PartyIdentity) -> Result<(), FatturaError> {
    w.start_element("Anagrafica")?;
    match identity {
        PartyIdentity::Company { name } => {
            w.text_element("Denominazione", name)?;
        }
        PartyIdentity::Person {
            first_name,
            last_name,
        } => {
            w.text_element("Nome", first_name)?;
            w.text_element("Cognome", last_name)?;
        }
    }
    w.end_element("Anagrafica")?;
    Ok(())
}

fn write_address(w: &mut XmlWriter, address: &Address) -> Result<(), FatturaError> {
    w.start_element("Sede")?;
    w.text_element("Indirizzo", &address.street)?;
    w.text_element("CAP", &address.postal_code)?;
    w.text_element("Comune", &address.municipality)?;
    if let Some(province) = &address.province {
        w.text_element("Provincia", province)?;
    }
    w.text_element("Nazione", &address.country)?;
    w.end_element("Sede")?;
    Ok(())
}

fn write_body(w: &mut XmlWriter, invoice: &InvoiceDocument) -> Result<(), FatturaError> {
    w.start_element("FatturaElettronicaBody")?;

    // 2.1: DatiGenerali
    w.start_element("DatiGenerali")?;
    w.start_element("DatiGeneraliDocumento")?;
    w.text_element("TipoDocumento", invoice.document_type.code())?;
    w.text_element("Divisa", &invoice.currency)?;
    w.text_element("Data", &invoice.issue_date.to_string())?;
    w.text_element("Numero", &invoice.number)?;

    if let Some(withholding) = &invoice.withholding {
        w.start_element("DatiRitenuta")?;
        w.text_element("TipoRitenuta", withholding.kind.code())?;
        w.amount_element("ImportoRitenuta", withholding.amount)?;
        w.amount_element("AliquotaRitenuta", withholding.rate)?;
        w.text_element("CausalePagamento", &withholding.payment_reason)?;
        w.end_element("DatiRitenuta")?;
    }

    if let Some(stamp) = &invoice.stamp_duty {
        w.start_element("DatiBollo")?;
        w.text_element("BolloVirtuale", "SI")?;
        w.amount_element("ImportoBollo", stamp.amount)?;
        w.end_element("DatiBollo")?;
    }

    for contribution in &invoice.social_security {
        w.start_element("DatiCassaPrevidenziale")?;
        w.text_element("TipoCassa", contribution.fund.code())?;
        w.amount_element("AlCassa", contribution.rate)?;
        w.amount_element("ImportoContributoCassa", contribution.amount)?;
        if let Some(taxable) = contribution.taxable_amount {
            w.amount_element("ImponibileCassa", taxable)?;
        }
        w.amount_element("AliquotaIVA", contribution.vat_rate)?;
        if let Some(nature) = contribution.nature {
            w.text_element("Natura", nature.code())?;
        }
        w.end_element("DatiCassaPrevidenziale")?;
    }

    if let Some(total) = invoice.total_amount {
        w.amount_element("ImportoTotaleDocumento", total)?;
    }
    w.end_element("DatiGeneraliDocumento")?;

    // 2.1.8: DatiDDT
    for related in &invoice.related_documents {
        w.start_element("DatiDDT")?;
        w.text_element("NumeroDDT", &related.number)?;
        if let Some(date) = related.date {
            w.text_element("DataDDT", &date.to_string())?;
        }
        for line_ref in &related.line_refs {
            w.text_element("RiferimentoNumeroLinea", &line_ref.to_string())?;
        }
        w.end_element("DatiDDT")?;
    }
    w.end_element("DatiGenerali")?;

    // 2.2: DatiBeniServizi
    w.start_element("DatiBeniServizi")?;
    for line in &invoice.lines {
        write_line(w, line)?;
    }
    for summary in &invoice.vat_summaries {
        w.start_element("DatiRiepilogo")?;
        w.amount_element("AliquotaIVA", summary.vat_rate)?;
        if let Some(nature) = summary.nature {
            w.text_element("Natura", nature.code())?;
        }
        w.amount_element("ImponibileImporto", summary.taxable_amount)?;
        w.amount_element("Imposta", summary.tax_amount)?;
        if let Some(liability) = summary.liability {
            w.text_element("EsigibilitaIVA", liability.code())?;
        }
        w.end_element("DatiRiepilogo")?;
    }
    w.end_element("DatiBeniServizi")?;

    // 2.4: DatiPagamento
    if let Some(payment) = &invoice.payment {
        w.start_element("DatiPagamento")?;
        w.text_element("CondizioniPagamento", payment.terms.code())?;
        for detail in &payment.details {
            w.start_element("DettaglioPagamento")?;
            w.text_element("ModalitaPagamento", detail.method.code())?;
            if let Some(due) = detail.due_date {
                w.text_element("DataScadenzaPagamento", &due.to_string())?;
            }
            w.amount_element("ImportoPagamento", detail.amount)?;
            if let Some(iban) = &detail.iban {
                w.text_element("IBAN", iban)?;
            }
            w.end_element("DettaglioPagamento")?;
        }
        w.end_element("DatiPagamento")?;
    }

    // 2.5: Allegati
    for attachment in &invoice.attachments {
        w.start_element("Allegati")?;
        w.text_element("NomeAttachment", &attachment.name)?;
        if let Some(format) = &attachment.format {
            w.text_element("FormatoAttachment", format)?;
        }
        if let Some(description) = &attachment.description {
            w.text_element("DescrizioneAttachment", description)?;
        }
        w.text_element("Attachment", &attachment.data)?;
        w.end_element("Allegati")?;
    }

    w.end_element("FatturaElettronicaBody")?;
    Ok(())
}

fn write_line(w: &mut XmlWriter, line: &LineItem) -> Result<(), FatturaError> {
    w.start_element("DettaglioLinee")?;
    w.text_element("NumeroLinea", &line.number.to_string())?;
    w.text_element("Descrizione", &truncate_chars(&line.description))?;
    if let Some(quantity) = line.quantity {
        w.amount_element("Quantita", quantity)?;
    }
    if let Some(unit) = &line.unit {
        w.text_element("UnitaMisura", unit)?;
    }
    w.amount_element("PrezzoUnitario", line.unit_price)?;
    w.amount_element("PrezzoTotale", line.total_price)?;
    w.amount_element("AliquotaIVA", line.vat_rate)?;
    if let Some(nature) = line.nature {
        w.text_element("Natura", nature.code())?;
    }
    w.end_element("DettaglioLinee")?;
    Ok(())
}

/// Hard-truncate oversized descriptions at the schema maximum.
fn truncate_chars(text: &str) -> String {
    text.chars().take(MAX_DESCRIPTION_LEN).collect()
}
