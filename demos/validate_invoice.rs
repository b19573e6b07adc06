use fatturapa::sdi;

fn main() {
    let path = std::env::args().nth(1);

    let xml = match &path {
        Some(path) => std::fs::read_to_string(path).expect("file should be readable"),
        None => {
            // No file given: validate a deliberately broken document.
            println!("No file argument — validating a sample broken document.\n");
            concat!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
                "<p:FatturaElettronica versione=\"FPR12\">\n",
                "  <FatturaElettronicaHeader>\n",
                "    <DatiTrasmissione>\n",
                "      <IdTrasmittente><IdPaese>IT</IdPaese><IdCodice>06363391001</IdCodice></IdTrasmittente>\n",
                "      <ProgressivoInvio>00001</ProgressivoInvio>\n",
                "      <FormatoTrasmissione>FPR12</FormatoTrasmissione>\n",
                "      <CodiceDestinatario>SHORT</CodiceDestinatario>\n",
                "    </DatiTrasmissione>\n",
                "  </FatturaElettronicaHeader>\n",
                "  <FatturaElettronicaBody>\n",
                "    <DatiGenerali><DatiGeneraliDocumento>\n",
                "      <TipoDocumento>TD99</TipoDocumento>\n",
                "      <Divisa>EUR</Divisa>\n",
                "      <Data>2024-03-01</Data>\n",
                "      <Numero>42/A</Numero>\n",
                "    </DatiGeneraliDocumento></DatiGenerali>\n",
                "  </FatturaElettronicaBody>\n",
                "</p:FatturaElettronica>\n",
            )
            .to_string()
        }
    };

    let report = sdi::validate(&xml);
    if report.is_valid() {
        println!("Document is valid.");
    } else {
        println!("Document is invalid — {} errors:", report.errors.len());
        for e in &report.errors {
            println!("  {e}");
        }
    }
}
