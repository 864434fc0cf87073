use dupi_pdu::{
    BatchLimits, PduError, SiteName, DEFAULT_MAX_PAYLOAD, DEFAULT_SAMPLING, DEFAULT_SITE_NAME,
    PDU_VERSION,
};
use dupi_schema::{MappingError, PositionalMapping};
use dupi_transport::MAX_UDP_PAYLOAD;
use tracing::{debug, warn};

/// Errors in static export configuration. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No destination host configured.
    #[error("destination host must not be empty")]
    EmptyHost,

    /// Destination port 0 cannot receive datagrams.
    #[error("destination port must not be zero")]
    ZeroPort,

    /// A zero sampling factor is meaningless (it is a divisor).
    #[error("sampling factor must be at least 1")]
    ZeroSampling,

    /// The payload ceiling exceeds what one UDP datagram can carry.
    #[error("max payload {max_payload} exceeds the UDP limit of {limit} bytes")]
    PayloadAboveUdpLimit { max_payload: usize, limit: usize },

    /// The payload ceiling cannot hold a single record.
    #[error("invalid batch limits: {0}")]
    Limits(#[from] PduError),

    /// The positional mapping is inconsistent with its schema.
    #[error("invalid field mapping: {0}")]
    Mapping(#[from] MappingError),
}

/// Export settings, built once at process start.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Collector host name or address.
    pub destination_host: String,
    /// Collector UDP port.
    pub destination_port: u16,
    /// Site label written into every header. Truncated to 16 bytes.
    pub site_name: String,
    /// Maximum datagram payload in bytes.
    pub max_payload: usize,
    /// Sampling factor 1/n written into every header.
    pub sampling: u32,
    /// Protocol version written into every header.
    pub pdu_version: u16,
    /// Source schema to record mapping.
    pub mapping: PositionalMapping,
}

impl ExportConfig {
    /// Config for a collector with every other setting at its default.
    pub fn new(destination_host: impl Into<String>, destination_port: u16) -> Self {
        Self {
            destination_host: destination_host.into(),
            destination_port,
            site_name: DEFAULT_SITE_NAME.to_string(),
            max_payload: DEFAULT_MAX_PAYLOAD,
            sampling: DEFAULT_SAMPLING,
            pdu_version: PDU_VERSION,
            mapping: PositionalMapping::VPC_FLOW_LOG_V2,
        }
    }

    /// Check the settings once and compute the batch limits.
    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        if self.destination_host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if self.destination_port == 0 {
            return Err(ConfigError::ZeroPort);
        }
        if self.sampling == 0 {
            return Err(ConfigError::ZeroSampling);
        }
        if self.max_payload > MAX_UDP_PAYLOAD {
            return Err(ConfigError::PayloadAboveUdpLimit {
                max_payload: self.max_payload,
                limit: MAX_UDP_PAYLOAD,
            });
        }
        self.mapping.validate()?;
        let limits = BatchLimits::new(self.max_payload)?;

        if SiteName::truncates(&self.site_name) {
            warn!(site_name = %self.site_name, "site name longer than 16 bytes, truncating");
        }
        debug!(
            max_payload = self.max_payload,
            max_records = limits.max_records(),
            "export limits"
        );

        Ok(ValidatedConfig {
            site: SiteName::new(&self.site_name),
            limits,
            config: self,
        })
    }
}

/// Configuration that passed [`ExportConfig::validate`].
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    config: ExportConfig,
    limits: BatchLimits,
    site: SiteName,
}

impl ValidatedConfig {
    pub fn destination_host(&self) -> &str {
        &self.config.destination_host
    }

    pub fn destination_port(&self) -> u16 {
        self.config.destination_port
    }

    pub fn limits(&self) -> &BatchLimits {
        &self.limits
    }

    pub fn site_name(&self) -> SiteName {
        self.site
    }

    pub fn sampling(&self) -> u32 {
        self.config.sampling
    }

    pub fn pdu_version(&self) -> u16 {
        self.config.pdu_version
    }

    pub fn mapping(&self) -> &PositionalMapping {
        &self.config.mapping
    }

    /// The settings as originally given.
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }
}
