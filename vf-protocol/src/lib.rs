use serde::{Deserialize, Serialize};

/// Maximum size of one JSON line (1MB)
pub const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

/// Maximum raw VIN input length (separators allowed before normalization)
pub const MAX_VIN_INPUT_LENGTH: usize = 64;

/// Maximum make/model/engine/trim/part id length
pub const MAX_FIELD_LENGTH: usize = 64;

/// Maximum candidate parts per match request
pub const MAX_CANDIDATES: usize = 5000;

/// Maximum compatibility rules per part
pub const MAX_RULES_PER_PART: usize = 256;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// Caller-chosen ID echoed in the response
    #[serde(default)]
    pub id: u64,
    /// The actual request
    #[serde(flatten)]
    pub request: Request,
}

impl RequestEnvelope {
    pub fn with_id(request: Request, id: u64) -> Self {
        Self { id, request }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", content = "data")]
pub enum Request {
    Ping,
    Version,
    /// Decode one VIN; `normalize` strips separators and uppercases first
    Decode {
        vin: String,
        #[serde(default)]
        normalize: bool,
    },
    LookupWmi { wmi: String },
    /// Rank candidate parts for a described vehicle
    Match {
        vehicle: Vehicle,
        candidates: Vec<Part>,
        #[serde(default)]
        min_score: Option<u8>,
    },
    /// Decode a VIN, build the vehicle from it, then rank candidates
    DecodeAndMatch {
        vin: String,
        model: String,
        #[serde(default)]
        engine_type: Option<String>,
        #[serde(default)]
        trim: Option<String>,
        candidates: Vec<Part>,
        #[serde(default)]
        min_score: Option<u8>,
    },
}

impl Request {
    /// Validate request parameters before dispatch
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Request::Ping | Request::Version => Ok(()),

            Request::Decode { vin, normalize: _ } => validate_vin_input(vin),

            Request::LookupWmi { wmi } => validate_wmi(wmi),

            Request::Match { vehicle, candidates, min_score } => {
                vehicle.validate()?;
                validate_candidates(candidates)?;
                validate_min_score(*min_score)?;
                Ok(())
            }

            Request::DecodeAndMatch { vin, model, engine_type, trim, candidates, min_score } => {
                validate_vin_input(vin)?;
                validate_field("model", model)?;
                validate_optional_field("engine_type", engine_type.as_deref())?;
                validate_optional_field("trim", trim.as_deref())?;
                validate_candidates(candidates)?;
                validate_min_score(*min_score)?;
                Ok(())
            }
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Request::Ping => "Ping",
            Request::Version => "Version",
            Request::Decode { .. } => "Decode",
            Request::LookupWmi { .. } => "LookupWmi",
            Request::Match { .. } => "Match",
            Request::DecodeAndMatch { .. } => "DecodeAndMatch",
        }
    }
}

/// Vehicle attributes as sent by a caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub make: String,
    pub model: String,
    pub year: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,
}

impl Vehicle {
    pub fn validate(&self) -> Result<(), String> {
        validate_field("make", &self.make)?;
        validate_field("model", &self.model)?;
        validate_optional_field("engine_type", self.engine_type.as_deref())?;
        validate_optional_field("trim", self.trim.as_deref())?;
        validate_optional_field("body_type", self.body_type.as_deref())?;
        Ok(())
    }
}

/// One compatibility rule of a part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub make: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_from: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_to: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim: Option<String>,
}

impl Rule {
    pub fn validate(&self) -> Result<(), String> {
        validate_field("make", &self.make)?;
        validate_field("model", &self.model)?;
        validate_optional_field("engine_type", self.engine_type.as_deref())?;
        validate_optional_field("trim", self.trim.as_deref())?;
        Ok(())
    }
}

/// Candidate part with its compatibility rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub part_id: String,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Request ID this response corresponds to
    pub id: u64,
    /// The actual response
    #[serde(flatten)]
    pub response: Response,
}

impl ResponseEnvelope {
    pub fn new(id: u64, response: Response) -> Self {
        Self { id, response }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum Response {
    #[serde(rename = "ok")]
    Ok(ResponseData),
    #[serde(rename = "error")]
    Error { message: String },
}

/// Response data - each request fills exactly one field
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoded: Option<DecodedVin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wmi: Option<WmiInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitments: Option<Vec<Fitment>>,
    /// DecodeAndMatch: the vehicle the candidates were ranked against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<Vehicle>,
}

impl ResponseData {
    pub fn string(v: String) -> Self { Self { value: Some(v), ..Self::default() } }
    pub fn decoded(d: DecodedVin) -> Self { Self { decoded: Some(d), ..Self::default() } }
    pub fn wmi(w: WmiInfo) -> Self { Self { wmi: Some(w), ..Self::default() } }
    pub fn fitments(f: Vec<Fitment>) -> Self { Self { fitments: Some(f), ..Self::default() } }
    pub fn decoded_match(d: DecodedVin, v: Vehicle, f: Vec<Fitment>) -> Self {
        Self { decoded: Some(d), vehicle: Some(v), fitments: Some(f), ..Self::default() }
    }
}

/// Decoded VIN fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedVin {
    pub vin: String,
    pub manufacturer: String,
    pub country: String,
    pub region: String,
    pub model_year: u16,
    pub model_year_code: String,
    pub wmi: String,
    pub vds: String,
    pub plant_code: String,
    pub serial: String,
    pub check_digit_valid: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WmiInfo {
    pub wmi: String,
    pub manufacturer: String,
    pub make: String,
    pub country: String,
}

/// Ranked fitment of one part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fitment {
    pub part_id: String,
    pub score: u8,
    /// exact, high, medium, low or none
    pub confidence: String,
    pub matched_rule: Option<Rule>,
    pub reasons: Vec<String>,
}

impl Response {
    pub fn ok_string(s: impl Into<String>) -> Self {
        Response::Ok(ResponseData::string(s.into()))
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Response::Error { message: msg.into() }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ok(_))
    }
}

pub fn validate_vin_input(vin: &str) -> Result<(), String> {
    if vin.is_empty() {
        return Err("VIN cannot be empty".into());
    }
    if vin.len() > MAX_VIN_INPUT_LENGTH {
        return Err(format!(
            "VIN input too long: {} > {} bytes",
            vin.len(),
            MAX_VIN_INPUT_LENGTH
        ));
    }
    if vin.chars().any(|c| c.is_control()) {
        return Err("VIN contains control characters".into());
    }
    Ok(())
}

pub fn validate_wmi(wmi: &str) -> Result<(), String> {
    if wmi.chars().count() != 3 {
        return Err("WMI must be exactly 3 characters".into());
    }
    if !wmi.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("WMI must be alphanumeric".into());
    }
    Ok(())
}

pub fn validate_field(name: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} cannot be empty", name));
    }
    if value.chars().count() > MAX_FIELD_LENGTH {
        return Err(format!(
            "{} too long (maximum {} characters)",
            name, MAX_FIELD_LENGTH
        ));
    }
    if value.chars().any(|c| c.is_control()) {
        return Err(format!("{} contains control characters", name));
    }
    Ok(())
}

fn validate_optional_field(name: &str, value: Option<&str>) -> Result<(), String> {
    match value {
        Some(v) => validate_field(name, v),
        None => Ok(()),
    }
}

pub fn validate_candidates(candidates: &[Part]) -> Result<(), String> {
    if candidates.len() > MAX_CANDIDATES {
        return Err(format!(
            "Too many candidates: {} > {}",
            candidates.len(),
            MAX_CANDIDATES
        ));
    }
    for part in candidates {
        validate_field("part_id", &part.part_id)?;
        if part.rules.len() > MAX_RULES_PER_PART {
            return Err(format!(
                "Part {} has too many rules: {} > {}",
                part.part_id,
                part.rules.len(),
                MAX_RULES_PER_PART
            ));
        }
        for rule in &part.rules {
            rule.validate()
                .map_err(|e| format!("Part {}: {}", part.part_id, e))?;
        }
    }
    Ok(())
}

pub fn validate_min_score(min_score: Option<u8>) -> Result<(), &'static str> {
    match min_score {
        Some(score) if score > 100 => Err("min_score must be 0-100"),
        _ => Ok(()),
    }
}
