//! Prints every series of an SDMX-ML 2.0 data message with its key
//! described in a chosen language.
//!
//! Run with: `cargo run --example describe`
//!
//! or against your own files:
//!
//! ```text
//! RUST_LOG=debug cargo run --example describe -- data.xml --dsd structure.xml --compact --lang fr
//! ```
//!
//! A `keyFamilyURI` of the form `file://<path>` is read from disk; any other
//! URI fails, since this example has no HTTP client.

use clap::Parser;
use sdmx::data::SourceError;
use sdmx::prelude::*;
use std::io::BufReader;
use std::path::PathBuf;

const SAMPLE_DSD: &str = r#"<Structure xmlns="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/message" xmlns:structure="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/structure">
    <CodeLists>
        <structure:CodeList id="CL_COUNTRY" agencyID="OECD">
            <structure:Code value="OECD-E"><structure:Description xml:lang="en">OECD(EUR million)</structure:Description></structure:Code>
        </structure:CodeList>
        <structure:CodeList id="CL_INDIC" agencyID="OECD">
            <structure:Code value="TO-VP"><structure:Description xml:lang="en">Total value of production (at farm gate)</structure:Description></structure:Code>
            <structure:Code value="TO-VP1P" parentCode="TO-VP"><structure:Description xml:lang="en">of which: share of MPS commodities, percentage</structure:Description></structure:Code>
        </structure:CodeList>
    </CodeLists>
    <Concepts>
        <structure:Concept id="COUNTRY"><structure:Name xml:lang="en">Country</structure:Name></structure:Concept>
        <structure:Concept id="INDIC"><structure:Name xml:lang="en">Indicator</structure:Name></structure:Concept>
    </Concepts>
    <KeyFamilies>
        <structure:KeyFamily id="MON2012TSE_O" agencyID="OECD">
            <structure:Name xml:lang="en">2012 A) OECD: Estimate of support to agriculture</structure:Name>
            <structure:Components>
                <structure:Dimension conceptRef="COUNTRY" codelist="CL_COUNTRY"/>
                <structure:Dimension conceptRef="INDIC" codelist="CL_INDIC"/>
                <structure:TimeDimension conceptRef="TIME"/>
                <structure:PrimaryMeasure conceptRef="OBS_VALUE"/>
            </structure:Components>
        </structure:KeyFamily>
    </KeyFamilies>
</Structure>"#;

const SAMPLE_DATA: &str = r#"<CompactData xmlns="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/message">
    <DataSet xmlns="urn:oecd:data">
        <Series COUNTRY="OECD-E" INDIC="TO-VP" TIME_FORMAT="P1Y">
            <Obs TIME="1986" OBS_VALUE="538954.220075479"/>
            <Obs TIME="1987" OBS_VALUE="598184.668422966"/>
        </Series>
        <Series COUNTRY="OECD-E" INDIC="TO-VP1P" TIME_FORMAT="P1Y">
            <Obs TIME="1986" OBS_VALUE="12.5"/>
        </Series>
    </DataSet>
</CompactData>"#;

#[derive(Parser, Debug)]
#[command(name = "describe")]
#[command(about = "Print the series of an SDMX-ML 2.0 data message with described keys")]
struct Args {
    /// Data message to decode; the built-in sample is used when omitted
    data: Option<PathBuf>,

    /// Structure document used when a dataset has no keyFamilyURI
    #[arg(long, short = 'd')]
    dsd: Option<PathBuf>,

    /// Decode a compact message instead of a generic one
    #[arg(long, short = 'c')]
    compact: bool,

    /// Language of the printed labels
    #[arg(long, short = 'l', default_value = "en")]
    lang: String,
}

fn read_file_uri(url: &str) -> Result<Vec<u8>, SourceError> {
    let path = url
        .strip_prefix("file://")
        .ok_or_else(|| format!("unsupported URI scheme in '{url}'"))?;
    Ok(std::fs::read(path)?)
}

fn describe<C: Cursor, F: DataFormat>(
    mut message: MessageReader<'_, C, F>,
    lang: &str,
) -> Result<(), DecodeError> {
    while let Some(mut dataset) = message.next_dataset()? {
        let key_family = dataset.key_family();
        println!(
            "Dataset {} ({})",
            key_family.id(),
            key_family.name(lang).unwrap_or("unnamed")
        );
        println!("  Dimensions: {}", key_family.describe_dimensions(lang)?.join(", "));

        while let Some(mut series) = dataset.next_series()? {
            println!("  Series");
            for (dimension, labels) in series.describe_key(lang)? {
                println!("    {dimension}: {}", labels.join(" / "));
            }
            for observation in series.observations(Some(lang))? {
                let observation = observation?;
                println!("      {:>10}  {}", observation.time, observation.value);
            }
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let format = if args.compact {
        Format::Compact
    } else {
        Format::Generic
    };

    let mut builder = Decoder::builder().format(format).source(read_file_uri);
    match (&args.data, &args.dsd) {
        (Some(_), Some(dsd)) => {
            builder = builder.default_metadata_bytes(std::fs::read_to_string(dsd)?);
        }
        (Some(_), None) => {}
        (None, _) => {
            tracing::info!("no input given, decoding the built-in sample");
            builder = builder
                .format(Format::Compact)
                .default_metadata_bytes(SAMPLE_DSD);
        }
    }
    let decoder = builder.build()?;

    match &args.data {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            describe(decoder.stream(BufReader::new(file)), &args.lang)?;
        }
        None => describe(decoder.stream_bytes(SAMPLE_DATA.as_bytes()), &args.lang)?,
    }

    tracing::info!(cached = decoder.cache().len(), "done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["describe"]).unwrap();
        assert!(args.data.is_none());
        assert!(!args.compact);
        assert_eq!(args.lang, "en");
    }

    #[test]
    fn test_args_flags() {
        let args =
            Args::try_parse_from(["describe", "data.xml", "--compact", "-d", "dsd.xml", "-l", "fr"])
                .unwrap();
        assert_eq!(args.data, Some(PathBuf::from("data.xml")));
        assert_eq!(args.dsd, Some(PathBuf::from("dsd.xml")));
        assert!(args.compact);
        assert_eq!(args.lang, "fr");
    }
}
