//! Client facade tying templates, transport and extraction together.

use crate::cache::{self, FilePlateCache, PlateCache};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::extract::{self, Document};
use crate::template::{self, Template};
use crate::transport::{HttpTransport, SoapGateway, SoapTransport};
use crate::vehicle::{self, VehicleInfo};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Remote operation for the driving licence validity check.
const OPERATION_LICENCE_CHECK: &str = "documentVerificatieSysteem";
/// Remote operation for the vehicle scan.
const OPERATION_VEHICLE_SCAN: &str = "opvragenVoertuigscanMSI";

/// Client for the RDC vehicle registry.
///
/// Owns one lazily created [`SoapGateway`] per distinct endpoint URL,
/// memoized for the client's lifetime. The memoization is behind a lock,
/// so a client shared across threads is safe; calls themselves are
/// synchronous blocking round-trips with no retries.
pub struct InMotivClient {
    config: ClientConfig,
    transport: Arc<dyn SoapTransport>,
    cache: Option<Box<dyn PlateCache>>,
    gateways: Mutex<HashMap<String, Arc<SoapGateway>>>,
}

impl InMotivClient {
    /// Create a client using the blocking HTTP transport.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, Arc::new(HttpTransport::new()))
    }

    /// Create a client with an injected transport. This is the seam tests
    /// use to script exchanges without touching the network.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn SoapTransport>) -> Self {
        let cache: Option<Box<dyn PlateCache>> = config
            .cache_dir
            .as_ref()
            .map(|dir| Box::new(FilePlateCache::new(dir)) as Box<dyn PlateCache>);

        Self {
            config,
            transport,
            cache,
            gateways: Mutex::new(HashMap::new()),
        }
    }

    /// Check whether a driving licence is valid for the given holder.
    ///
    /// The birthday is sent as an eight-digit `YYYYMMDD` string. The
    /// response must contain a `RIJBEWIJSGELDIG` node; its absence is a
    /// protocol violation, not a "no" answer. The licence is valid only
    /// when that node's text is exactly `"J"`.
    pub fn is_driving_licence_valid(
        &self,
        licence_number: u64,
        birth_year: u32,
        birth_month: u32,
        birth_day: u32,
    ) -> Result<bool> {
        let birthday = format!("{:04}{:02}{:02}", birth_year, birth_month, birth_day);
        let request = template::render(
            Template::DrivingLicenceCheck,
            &[
                ("rdc", self.config.client_number.as_str()),
                ("driving_licence_number", &licence_number.to_string()),
                ("driver_birthday", &birthday),
            ],
        )?;

        let gateway = self.gateway(self.config.environment.licence_verification_url());
        let body = gateway.call(OPERATION_LICENCE_CHECK, &request)?;

        let document = Document::parse(&body)?;
        let value = extract::required_text(document.root(), "RIJBEWIJSGELDIG")?;

        Ok(value == "J")
    }

    /// Look up the registry record for a numberplate.
    ///
    /// When a cache is configured, the raw response is memoized under a
    /// stable hash of the plate; a hit skips the remote call entirely.
    pub fn vehicle_info(&self, numberplate: &str) -> Result<VehicleInfo> {
        let key = cache::plate_key(numberplate);

        if let Some(cache) = &self.cache {
            if let Some(raw) = cache.get(&key) {
                debug!(key = %key, "vehicle scan served from cache");
                return vehicle::assemble(&Document::parse(&raw)?);
            }
        }

        let request = template::render(
            Template::VehicleScan,
            &[
                ("rdc", self.config.client_number.as_str()),
                ("numberplate", numberplate),
            ],
        )?;

        let gateway = self.gateway(self.config.environment.vehicle_scan_url());
        let body = gateway.call(OPERATION_VEHICLE_SCAN, &request)?;

        if let Some(cache) = &self.cache {
            cache.put(&key, &body);
        }

        let info = vehicle::assemble(&Document::parse(&body)?)?;
        info!(brand = info.brand(), "vehicle scan resolved");
        Ok(info)
    }

    /// Parse a previously captured scan response without any transport.
    pub fn vehicle_info_from_xml(&self, xml: &str) -> Result<VehicleInfo> {
        vehicle::assemble(&Document::parse(xml)?)
    }

    /// Gateway for `url`, created on first use and reused afterwards.
    fn gateway(&self, url: &str) -> Arc<SoapGateway> {
        let mut gateways = self.gateways.lock().expect("gateway map poisoned");
        Arc::clone(gateways.entry(url.to_string()).or_insert_with(|| {
            Arc::new(SoapGateway::new(
                url,
                self.config.username.clone(),
                self.config.password.clone(),
                self.config.debug,
                Arc::clone(&self.transport),
            ))
        }))
    }
}
