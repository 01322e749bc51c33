//! Command-line vocabulary of the extcap provider protocol

/// Arguments understood by every extcap provider
pub mod arguments {
    /// Ask the provider for the interfaces it offers
    pub const LIST_INTERFACES: &str = "--extcap-interfaces";
    /// Ask the provider for the link types of one interface
    pub const LIST_DLTS: &str = "--extcap-dlts";
    /// Select the interface a query or capture applies to
    pub const INTERFACE: &str = "--extcap-interface";
    /// Ask the provider for the configuration schema of one interface
    pub const CONFIG: &str = "--extcap-config";
    /// Start a live capture
    pub const RUN_CAPTURE: &str = "--capture";
    /// Pipe or FIFO the provider writes captured frames into
    pub const RUN_PIPE: &str = "--fifo";
}

/// Default prefix for pipe and FIFO names
pub const EXTCAP_PIPE_PREFIX: &str = "wireshark_extcap";

/// Maximum number of instances of one named pipe
pub const PIPE_MAX_INSTANCES: usize = 5;

/// Named pipe in/out buffer size in bytes
pub const PIPE_BUFFER_SIZE: u32 = 65536;
