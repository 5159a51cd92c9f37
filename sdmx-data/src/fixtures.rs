//! Shared SDMX documents for unit tests.

use crate::error::SourceError;
use crate::fetch::{MetadataSource, StaticSource};
use std::io::Read;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const DSD_URL: &str =
    "http://stats.oecd.org/RestSDMX/sdmx.ashx/GetKeyFamily/MON2012TSE_O/OECD/?resolveRef=true";

pub const DSD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Structure xmlns="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/message" xmlns:structure="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/structure">
    <CodeLists>
        <structure:CodeList id="CL_MON2012TSE_O_COUNTRY" agencyID="OECD">
            <structure:Code value="OECD-E">
                <structure:Description xml:lang="en">OECD(EUR million)</structure:Description>
            </structure:Code>
        </structure:CodeList>
        <structure:CodeList id="CL_MON2012TSE_O_INDIC" agencyID="OECD">
            <structure:Code value="TO-VP">
                <structure:Description xml:lang="en">Total value of production (at farm gate)</structure:Description>
            </structure:Code>
            <structure:Code value="TO-VP1P" parentCode="TO-VP">
                <structure:Description xml:lang="en">of which: share of MPS commodities, percentage</structure:Description>
            </structure:Code>
        </structure:CodeList>
    </CodeLists>
    <Concepts>
        <structure:Concept id="COUNTRY">
            <structure:Name xml:lang="en">Country</structure:Name>
        </structure:Concept>
        <structure:Concept id="INDIC">
            <structure:Name xml:lang="en">Indicator</structure:Name>
        </structure:Concept>
    </Concepts>
    <KeyFamilies>
        <structure:KeyFamily id="MON2012TSE_O" agencyID="OECD">
            <structure:Name xml:lang="en">2012 A) OECD: Estimate of support to agriculture</structure:Name>
            <structure:Components>
                <structure:Dimension conceptRef="COUNTRY" codelist="CL_MON2012TSE_O_COUNTRY"/>
                <structure:Dimension conceptRef="INDIC" codelist="CL_MON2012TSE_O_INDIC"/>
                <structure:TimeDimension conceptRef="TIME" />
                <structure:PrimaryMeasure conceptRef="OBS_VALUE"><structure:TextFormat textType="Double" /></structure:PrimaryMeasure>
            </structure:Components>
        </structure:KeyFamily>
    </KeyFamilies>
</Structure>"#;

/// Same key family with a coded time dimension.
pub const TIME_DSD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Structure xmlns="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/message" xmlns:structure="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/structure">
    <CodeLists>
        <structure:CodeList id="CL_MON2012TSE_O_COUNTRY" agencyID="OECD">
            <structure:Code value="OECD-E">
                <structure:Description xml:lang="en">OECD(EUR million)</structure:Description>
            </structure:Code>
        </structure:CodeList>
        <structure:CodeList id="CL_MON2012TSE_O_INDIC" agencyID="OECD">
            <structure:Code value="TO-VP">
                <structure:Description xml:lang="en">Total value of production (at farm gate)</structure:Description>
            </structure:Code>
        </structure:CodeList>
        <structure:CodeList id="CL_MON2012TSE_O_TIME" agencyID="OECD">
            <structure:Code value="1986">
                <structure:Description xml:lang="en">1986</structure:Description>
            </structure:Code>
            <structure:Code value="1987">
                <structure:Description xml:lang="en">1987</structure:Description>
            </structure:Code>
            <structure:Code value="1987-Q1" parentCode="1987">
                <structure:Description xml:lang="en">Q1</structure:Description>
            </structure:Code>
        </structure:CodeList>
    </CodeLists>
    <Concepts>
        <structure:Concept id="COUNTRY">
            <structure:Name xml:lang="en">Country</structure:Name>
        </structure:Concept>
        <structure:Concept id="INDIC">
            <structure:Name xml:lang="en">Indicator</structure:Name>
        </structure:Concept>
    </Concepts>
    <KeyFamilies>
        <structure:KeyFamily id="MON2012TSE_O" agencyID="OECD">
            <structure:Name xml:lang="en">2012 A) OECD: Estimate of support to agriculture</structure:Name>
            <structure:Components>
                <structure:Dimension conceptRef="COUNTRY" codelist="CL_MON2012TSE_O_COUNTRY"/>
                <structure:Dimension conceptRef="INDIC" codelist="CL_MON2012TSE_O_INDIC"/>
                <structure:TimeDimension conceptRef="TIME" codelist="CL_MON2012TSE_O_TIME" />
                <structure:PrimaryMeasure conceptRef="OBS_VALUE"/>
            </structure:Components>
        </structure:KeyFamily>
    </KeyFamilies>
</Structure>"#;

/// Metadata document defining two key families.
pub const TWO_KEY_FAMILIES_DSD: &str = r#"<Structure xmlns="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/message" xmlns:structure="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/structure">
    <KeyFamilies>
        <structure:KeyFamily id="A"/>
        <structure:KeyFamily id="B"/>
    </KeyFamilies>
</Structure>"#;

pub const GENERIC: &str = r#"<message:MessageGroup xmlns="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/generic" xmlns:common="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/common" xmlns:message="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/message">
    <message:Header><message:ID>none</message:ID></message:Header>
    <DataSet keyFamilyURI="http://stats.oecd.org/RestSDMX/sdmx.ashx/GetKeyFamily/MON2012TSE_O/OECD/?resolveRef=true">
        <KeyFamilyRef>MON2012TSE_O</KeyFamilyRef>
        <Series>
            <SeriesKey>
                <Value concept="COUNTRY" value="OECD-E" />
                <Value concept="INDIC" value="TO-VP" />
            </SeriesKey>
            <Attributes><Value concept="UNIT" value="EUR" /></Attributes>
            <Obs><Time>1986</Time><ObsValue value="538954.220075479"/></Obs>
            <Obs><Time>1987</Time><ObsValue value="598184.668422966"/></Obs>
        </Series>
        <Series>
            <SeriesKey>
                <Value concept="COUNTRY" value="OECD-E" />
                <Value concept="INDIC" value="TO-VP1P" />
            </SeriesKey>
            <Obs><Time>1986</Time><ObsValue value="12.5"/><Attributes><Value concept="OBS_STATUS" value="E" /></Attributes></Obs>
        </Series>
    </DataSet>
</message:MessageGroup>"#;

/// Generic data carried in the message namespace.
pub const GENERIC_MESSAGE_NS: &str = r#"<message:genericData xmlns:message="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/message" xmlns:generic="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/generic" xmlns:common="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/common">
    <message:DataSet keyFamilyURI="http://stats.oecd.org/RestSDMX/sdmx.ashx/GetKeyFamily/MON2012TSE_O/OECD/?resolveRef=true">
        <generic:KeyFamilyRef>MON2012TSE_O</generic:KeyFamilyRef>
    </message:DataSet>
</message:genericData>"#;

pub const GENERIC_GROUPS: &str = r#"<message:MessageGroup xmlns="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/generic" xmlns:message="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/message">
    <DataSet>
        <KeyFamilyRef>MON2012TSE_O</KeyFamilyRef>
        <Group type="SiblingGroup">
            <GroupKey>
                <Value concept="INDIC" value="TO-VP1P" />
            </GroupKey>
            <Attributes><Value concept="UNIT" value="EUR" /></Attributes>
            <Series>
                <SeriesKey>
                    <Value concept="COUNTRY" value="OECD-E" />
                </SeriesKey>
                <Obs><Time>1986</Time><ObsValue value="1"/></Obs>
            </Series>
        </Group>
        <Series>
            <SeriesKey>
                <Value concept="COUNTRY" value="OECD-E" />
                <Value concept="INDIC" value="TO-VP" />
            </SeriesKey>
            <Obs><Time>1987</Time><ObsValue value="2"/></Obs>
        </Series>
    </DataSet>
</message:MessageGroup>"#;

/// Two datasets referencing the same metadata document.
pub const GENERIC_TWO_DATASETS: &str = r#"<message:MessageGroup xmlns="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/generic" xmlns:message="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/message">
    <DataSet keyFamilyURI="http://stats.oecd.org/RestSDMX/sdmx.ashx/GetKeyFamily/MON2012TSE_O/OECD/?resolveRef=true">
        <KeyFamilyRef>MON2012TSE_O</KeyFamilyRef>
        <Series>
            <SeriesKey><Value concept="COUNTRY" value="OECD-E" /><Value concept="INDIC" value="TO-VP" /></SeriesKey>
            <Obs><Time>1986</Time><ObsValue value="538954.220075479"/></Obs>
        </Series>
    </DataSet>
    <DataSet keyFamilyURI="http://stats.oecd.org/RestSDMX/sdmx.ashx/GetKeyFamily/MON2012TSE_O/OECD/?resolveRef=true">
        <KeyFamilyRef>MON2012TSE_O</KeyFamilyRef>
        <Series>
            <SeriesKey><Value concept="COUNTRY" value="OECD-E" /><Value concept="INDIC" value="TO-VP1P" /></SeriesKey>
            <Obs><Time>1987</Time><ObsValue value="598184.668422966"/></Obs>
        </Series>
    </DataSet>
</message:MessageGroup>"#;

/// Generic series whose time values are codes, padded with whitespace.
pub const GENERIC_CODED_TIME: &str = r#"<message:MessageGroup xmlns="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/generic" xmlns:message="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/message">
    <DataSet>
        <KeyFamilyRef>MON2012TSE_O</KeyFamilyRef>
        <Series>
            <SeriesKey><Value concept="COUNTRY" value="OECD-E" /><Value concept="INDIC" value="TO-VP" /></SeriesKey>
            <Obs><Time>
                1986
            </Time><ObsValue value="538954.220075479"/></Obs>
            <Obs><Time> 1987 </Time><ObsValue value="598184.668422966"/></Obs>
        </Series>
    </DataSet>
</message:MessageGroup>"#;

pub const COMPACT: &str = r#"<message:CompactData xmlns="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/message" xmlns:common="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/common" xmlns:compact="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/compact" xmlns:oecd="http://oecd.stat.org/Data" xmlns:message="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/message">
    <Header><ID>none</ID></Header>
    <oecd:DataSet keyFamilyURI="http://stats.oecd.org/RestSDMX/sdmx.ashx/GetKeyFamily/MON2012TSE_O/OECD/?resolveRef=true" xmlns:oecd="http://oecd.stat.org/Data">
        <oecd:Series COUNTRY="OECD-E" INDIC="TO-VP" TIME_FORMAT="P1Y">
            <oecd:Obs TIME="1986" OBS_VALUE="538954.220075479" />
            <oecd:Obs TIME="1987" OBS_VALUE="598184.668422966" />
        </oecd:Series>
        <oecd:Series COUNTRY="OECD-E" INDIC="TO-VP1P" TIME_FORMAT="P1Y">
            <oecd:Obs TIME="1986" OBS_VALUE="12.5" OBS_STATUS="E" />
        </oecd:Series>
    </oecd:DataSet>
</message:CompactData>"#;

/// Compact message without a `keyFamilyURI`.
pub const COMPACT_NO_URI: &str = r#"<CompactData xmlns="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/message">
    <DataSet xmlns="urn:oecd:data">
        <Series COUNTRY="OECD-E" INDIC="TO-VP">
            <Obs TIME="1986" OBS_VALUE="538954.220075479" />
        </Series>
    </DataSet>
</CompactData>"#;

/// Compact series whose time values are codes, padded with whitespace.
pub const COMPACT_CODED_TIME: &str = r#"<CompactData xmlns="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/message">
    <DataSet xmlns="urn:oecd:data">
        <Series COUNTRY="OECD-E" INDIC="TO-VP">
            <Obs TIME=" 1986 " OBS_VALUE="538954.220075479" />
            <Obs TIME="1987" OBS_VALUE="598184.668422966" />
        </Series>
    </DataSet>
</CompactData>"#;

/// Source that counts how often it is asked for a document. Clones share
/// the counter.
#[derive(Clone)]
pub struct CountingSource {
    inner: StaticSource,
    calls: Arc<AtomicUsize>,
}

impl CountingSource {
    pub fn new(url: &str, document: &str) -> Self {
        Self {
            inner: StaticSource::new().with_document(url, document),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MetadataSource for CountingSource {
    fn get(&self, url: &str) -> Result<Box<dyn Read + '_>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get(url)
    }
}
