//! Vehicle information record and its assembly from a scan response.

use crate::error::{Error, Result};
use crate::extract::{self, Document};

/// RDW classification code for a motorcycle.
pub const CLASS_MOTORCYCLE: u32 = 12;
/// RDW classification code for a motorcycle with sidecar.
pub const CLASS_MOTORCYCLE_WITH_SIDECAR: u32 = 13;

/// Immutable vehicle record produced from one successful scan response.
///
/// Optional fields are absent when the registry did not send the source
/// field: engine displacement for electric vehicles, first-registration
/// date for some imports, catalog price for vehicles never sold here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleInfo {
    brand: String,
    production_year: Option<i32>,
    engine_cc: Option<u32>,
    horse_power: u32,
    weight: u32,
    catalog_price: Option<u32>,
    rdw_class: u32,
    stolen: bool,
    raw_response: String,
}

impl VehicleInfo {
    /// Manufacturer name.
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Year of first registration, when known.
    pub fn production_year(&self) -> Option<i32> {
        self.production_year
    }

    /// Engine displacement in cc; absent for electric vehicles.
    pub fn engine_cc(&self) -> Option<u32> {
        self.engine_cc
    }

    /// Engine power in hp. Zero is a valid value.
    pub fn horse_power(&self) -> u32 {
        self.horse_power
    }

    /// Kerb weight in kg.
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Catalog price in euro, when known.
    pub fn catalog_price(&self) -> Option<u32> {
        self.catalog_price
    }

    /// RDW vehicle classification code.
    pub fn rdw_class(&self) -> u32 {
        self.rdw_class
    }

    /// True for a motorcycle, with or without sidecar.
    pub fn is_motorcycle(&self) -> bool {
        self.rdw_class == CLASS_MOTORCYCLE || self.rdw_class == CLASS_MOTORCYCLE_WITH_SIDECAR
    }

    /// True when the registry's stolen status code is anything but "0".
    pub fn is_stolen(&self) -> bool {
        self.stolen
    }

    /// The raw response XML this record was assembled from, kept verbatim
    /// for auditing.
    pub fn raw_response(&self) -> &str {
        &self.raw_response
    }
}

/// Assemble a [`VehicleInfo`] from a parsed scan response.
///
/// A response without a `Kentekengegevens` record carrying processing
/// status "00" means the plate is unknown, regardless of what else the
/// document contains. Each optional field independently falls back to
/// absent when its source node is missing; required fields propagate.
pub fn assemble(document: &Document) -> Result<VehicleInfo> {
    let root = document.root();

    let found = extract::find_all(root, "Kentekengegevens")
        .into_iter()
        .any(|node| node.attributes.get("Verwerkingsstatus").map(String::as_str) == Some("00"));
    if !found {
        return Err(Error::VehicleNotFound);
    }

    let brand = extract::required_text(root, "Merk")?;

    let production_year = extract::optional_text(root, "DatumEersteToelating")
        .map(|date| extract::year_prefix(&date, "DatumEersteToelating"))
        .transpose()?;

    let engine_cc = extract::optional_text(root, "Cilinderinhoud")
        .map(|cc| extract::integer(&cc, "Cilinderinhoud"))
        .transpose()?;

    let horse_power = extract::integer(
        &extract::required_text(root, "VermogenPK")?,
        "VermogenPK",
    )?;

    let weight = extract::integer(
        &extract::required_text(root, "MassaLeegVoertuig")?,
        "MassaLeegVoertuig",
    )?;

    let catalog_price = extract::optional_text(root, "PrijsConsument")
        .map(|price| extract::integer(&price, "PrijsConsument"))
        .transpose()?;

    let class_node = extract::first_node(root, "VoertuigClassificatieRDW")?;
    let rdw_class = extract::integer(
        &extract::required_attr(class_node, "Code")?,
        "VoertuigClassificatieRDW/@Code",
    )?;

    let stolen_node = extract::first_node(root, "StatusGestolen")?;
    let stolen = extract::required_attr(stolen_node, "Code")? != "0";

    Ok(VehicleInfo {
        brand,
        production_year,
        engine_cc,
        horse_power,
        weight,
        catalog_price,
        rdw_class,
        stolen,
        raw_response: document.raw().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_response(fields: &str) -> String {
        format!(
            r#"<?xml version="1.0"?>
<vts:opvragenVoertuigscanMSIResponse xmlns:vts="http://rdw.rdc.nl/voertuigscan/2.0">
  <vts:Kentekengegevens Verwerkingsstatus="00">
{}
  </vts:Kentekengegevens>
</vts:opvragenVoertuigscanMSIResponse>"#,
            fields
        )
    }

    fn car_response() -> String {
        scan_response(
            r#"    <vts:Merk>SKODA</vts:Merk>
    <vts:DatumEersteToelating>20110930</vts:DatumEersteToelating>
    <vts:Cilinderinhoud>1197</vts:Cilinderinhoud>
    <vts:VermogenPK>105</vts:VermogenPK>
    <vts:MassaLeegVoertuig>1205</vts:MassaLeegVoertuig>
    <vts:PrijsConsument>25630</vts:PrijsConsument>
    <vts:VoertuigClassificatieRDW Code="21">Personenauto</vts:VoertuigClassificatieRDW>
    <vts:StatusGestolen Code="0">Niet gestolen</vts:StatusGestolen>"#,
        )
    }

    fn electric_motorcycle_response() -> String {
        scan_response(
            r#"    <vts:Merk>ENERGICA</vts:Merk>
    <vts:DatumEersteToelating>20160501</vts:DatumEersteToelating>
    <vts:VermogenPK>0</vts:VermogenPK>
    <vts:MassaLeegVoertuig>282</vts:MassaLeegVoertuig>
    <vts:VoertuigClassificatieRDW Code="12">Motorfiets</vts:VoertuigClassificatieRDW>
    <vts:StatusGestolen Code="0">Niet gestolen</vts:StatusGestolen>"#,
        )
    }

    #[test]
    fn test_assemble_combustion_car() {
        let doc = Document::parse(&car_response()).unwrap();
        let info = assemble(&doc).unwrap();

        assert_eq!(info.brand(), "SKODA");
        assert_eq!(info.production_year(), Some(2011));
        assert_eq!(info.engine_cc(), Some(1197));
        assert_eq!(info.horse_power(), 105);
        assert_eq!(info.weight(), 1205);
        assert_eq!(info.catalog_price(), Some(25630));
        assert!(!info.is_motorcycle());
        assert!(!info.is_stolen());
    }

    #[test]
    fn test_assemble_electric_motorcycle() {
        let doc = Document::parse(&electric_motorcycle_response()).unwrap();
        let info = assemble(&doc).unwrap();

        assert_eq!(info.brand(), "ENERGICA");
        assert_eq!(info.engine_cc(), None);
        assert_eq!(info.catalog_price(), None);
        assert_eq!(info.horse_power(), 0);
        assert!(info.is_motorcycle());
    }

    #[test]
    fn test_assemble_without_first_registration_date() {
        let xml = scan_response(
            r#"    <vts:Merk>KTM</vts:Merk>
    <vts:Cilinderinhoud>373</vts:Cilinderinhoud>
    <vts:VermogenPK>44</vts:VermogenPK>
    <vts:MassaLeegVoertuig>159</vts:MassaLeegVoertuig>
    <vts:VoertuigClassificatieRDW Code="12">Motorfiets</vts:VoertuigClassificatieRDW>
    <vts:StatusGestolen Code="0">Niet gestolen</vts:StatusGestolen>"#,
        );
        let doc = Document::parse(&xml).unwrap();
        let info = assemble(&doc).unwrap();

        assert_eq!(info.production_year(), None);
        assert_eq!(info.engine_cc(), Some(373));
        assert_eq!(info.weight(), 159);
    }

    #[test]
    fn test_motorcycle_classification_codes() {
        for (code, expected) in [("12", true), ("13", true), ("21", false), ("1", false)] {
            let xml = scan_response(&format!(
                r#"    <vts:Merk>HONDA</vts:Merk>
    <vts:VermogenPK>53</vts:VermogenPK>
    <vts:MassaLeegVoertuig>221</vts:MassaLeegVoertuig>
    <vts:VoertuigClassificatieRDW Code="{}">x</vts:VoertuigClassificatieRDW>
    <vts:StatusGestolen Code="0">x</vts:StatusGestolen>"#,
                code
            ));
            let doc = Document::parse(&xml).unwrap();
            let info = assemble(&doc).unwrap();
            assert_eq!(info.is_motorcycle(), expected, "code {}", code);
        }
    }

    #[test]
    fn test_stolen_flag_set_for_nonzero_code() {
        let xml = scan_response(
            r#"    <vts:Merk>HONDA</vts:Merk>
    <vts:VermogenPK>53</vts:VermogenPK>
    <vts:MassaLeegVoertuig>221</vts:MassaLeegVoertuig>
    <vts:VoertuigClassificatieRDW Code="12">x</vts:VoertuigClassificatieRDW>
    <vts:StatusGestolen Code="1">Gestolen</vts:StatusGestolen>"#,
        );
        let doc = Document::parse(&xml).unwrap();
        assert!(assemble(&doc).unwrap().is_stolen());
    }

    #[test]
    fn test_missing_status_00_record_is_not_found() {
        let xml = r#"<?xml version="1.0"?>
<vts:opvragenVoertuigscanMSIResponse xmlns:vts="http://rdw.rdc.nl/voertuigscan/2.0">
  <vts:Kentekengegevens Verwerkingsstatus="01">
    <vts:Merk>SKODA</vts:Merk>
    <vts:VermogenPK>105</vts:VermogenPK>
    <vts:MassaLeegVoertuig>1205</vts:MassaLeegVoertuig>
    <vts:VoertuigClassificatieRDW Code="21">x</vts:VoertuigClassificatieRDW>
    <vts:StatusGestolen Code="0">x</vts:StatusGestolen>
  </vts:Kentekengegevens>
</vts:opvragenVoertuigscanMSIResponse>"#;
        let doc = Document::parse(xml).unwrap();
        let err = assemble(&doc).unwrap_err();
        assert!(matches!(err, Error::VehicleNotFound));
    }

    #[test]
    fn test_missing_required_field_propagates() {
        // No Merk node: required field, no fallback.
        let xml = scan_response(
            r#"    <vts:VermogenPK>105</vts:VermogenPK>
    <vts:MassaLeegVoertuig>1205</vts:MassaLeegVoertuig>
    <vts:VoertuigClassificatieRDW Code="21">x</vts:VoertuigClassificatieRDW>
    <vts:StatusGestolen Code="0">x</vts:StatusGestolen>"#,
        );
        let doc = Document::parse(&xml).unwrap();
        let err = assemble(&doc).unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse { .. }));
    }

    #[test]
    fn test_round_trip_from_raw_response() {
        let doc = Document::parse(&car_response()).unwrap();
        let info = assemble(&doc).unwrap();

        let doc2 = Document::parse(info.raw_response()).unwrap();
        let info2 = assemble(&doc2).unwrap();

        assert_eq!(info, info2);
    }
}
