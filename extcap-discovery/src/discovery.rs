//! Extcap discovery entry points
//!
//! [`ExtcapDiscovery`] answers the three discovery questions asked of
//! providers: which interfaces exist, which link types an interface
//! supports, and which configuration arguments it accepts. All three scan
//! the provider directory synchronously, one provider at a time.

use crate::invoker::{Invoker, ProcessInvoker};
use crate::registry::InterfaceRegistry;
use crate::scanner::{ScanControl, Scanner};
use extcap_core::{
    arguments, ArgumentDescriptor, Capabilities, Error, ExtcapConfig, InterfaceDescriptor,
    OutputParser, Result,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, enabled, info, trace, warn, Level};

/// Discovery facade over a provider directory
pub struct ExtcapDiscovery<P, I = ProcessInvoker> {
    config: ExtcapConfig,
    parser: P,
    invoker: I,
    registry: Arc<InterfaceRegistry>,
}

impl<P: OutputParser> ExtcapDiscovery<P, ProcessInvoker> {
    /// Create a discovery facade that runs real provider processes
    pub fn new(config: ExtcapConfig, parser: P) -> Self {
        Self::with_invoker(config, parser, ProcessInvoker)
    }
}

impl<P: OutputParser, I: Invoker> ExtcapDiscovery<P, I> {
    /// Create a discovery facade with a custom invoker
    pub fn with_invoker(config: ExtcapConfig, parser: P, invoker: I) -> Self {
        Self {
            config,
            parser,
            invoker,
            registry: Arc::new(InterfaceRegistry::new()),
        }
    }

    /// Use a shared interface registry instead of a private one
    pub fn with_registry(mut self, registry: Arc<InterfaceRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// The interface registry filled by [`Self::list_interfaces`]
    pub fn registry(&self) -> &Arc<InterfaceRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &ExtcapConfig {
        &self.config
    }

    /// Check if an interface was advertised during the last listing pass
    pub fn interface_exists(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Provider executable owning an interface
    pub fn provider_for(&self, name: &str) -> Option<PathBuf> {
        self.registry.lookup(name)
    }

    fn scanner(&self) -> Scanner<'_, I> {
        Scanner::new(&self.config.provider_dir, &self.invoker, &self.registry)
    }

    /// Ask every provider for its interfaces
    ///
    /// Rebuilds the registry from scratch. When two providers advertise the
    /// same interface name, the provider scanned first keeps it and the
    /// later advertisement is dropped with a warning.
    pub fn list_interfaces(&self) -> Vec<InterfaceDescriptor> {
        self.registry.reset();

        let mut interfaces = Vec::new();
        let report = self
            .scanner()
            .scan(&[arguments::LIST_INTERFACES], None, |provider, output| {
                debug!(provider = %provider.display(), "Extcap interface listing");

                for record in self.parser.parse_interfaces(output) {
                    if let Some(owner) = self.registry.lookup(&record.call) {
                        warn!(
                            interface = %record.call,
                            provider = %owner.display(),
                            rejected = %provider.display(),
                            "Extcap interface is already provided by another extcap"
                        );
                        continue;
                    }

                    debug!(interface = %record.call, display = %record.display, "Extcap interface");
                    self.registry.register(record.call.clone(), provider);
                    interfaces.push(InterfaceDescriptor::extcap(&record, provider.to_path_buf()));
                }

                ScanControl::Continue
            });

        info!(
            providers = report.responded,
            interfaces = interfaces.len(),
            "Extcap interface listing finished"
        );
        interfaces
    }

    /// Ask the owning provider for the link types of `ifname`
    pub fn get_capabilities(&self, ifname: &str) -> Result<Capabilities> {
        let owner = self
            .registry
            .lookup(ifname)
            .ok_or_else(|| Error::InterfaceNotFound(ifname.to_string()))?;

        let mut outcome: Option<Result<Capabilities>> = None;
        let report = self.scanner().scan(
            &[arguments::LIST_DLTS, arguments::INTERFACE, ifname],
            Some(ifname),
            |provider, output| {
                debug!(provider = %provider.display(), interface = %ifname, "Extcap link types");

                let records = self.parser.parse_link_types(output);
                for record in &records {
                    debug!(
                        dlt = record.number,
                        name = %record.name,
                        display = %record.display,
                        "Extcap link type"
                    );
                }

                outcome = Some(Capabilities::from_link_types(&records).ok_or_else(|| {
                    debug!(interface = %ifname, "Extcap returned no DLTs");
                    Error::NoLinkTypes {
                        interface: ifname.to_string(),
                    }
                }));

                ScanControl::Stop
            },
        );

        outcome.unwrap_or_else(|| {
            Err(Error::provider_failed(
                owner,
                None,
                report
                    .last_error
                    .unwrap_or_else(|| "no response to link type query".to_string()),
            ))
        })
    }

    /// Ask the owning provider for the configuration arguments of `ifname`
    ///
    /// Returns an empty list for unknown interfaces. Only the first
    /// successful response is used; a response without any arguments is
    /// reported as [`Error::NoArguments`].
    pub fn get_configuration(&self, ifname: &str) -> Result<Vec<ArgumentDescriptor>> {
        let Some(owner) = self.registry.lookup(ifname) else {
            return Ok(Vec::new());
        };

        debug!(dir = %self.config.provider_dir.display(), interface = %ifname, "Extcap configuration");

        let mut descriptors = None;
        let report = self.scanner().scan(
            &[arguments::CONFIG, arguments::INTERFACE, ifname],
            Some(ifname),
            |_, output| {
                descriptors = Some(self.parser.parse_arguments(output));
                ScanControl::Stop
            },
        );

        let Some(descriptors) = descriptors else {
            return Err(Error::provider_failed(
                owner,
                None,
                report
                    .last_error
                    .unwrap_or_else(|| "no response to configuration query".to_string()),
            ));
        };

        if descriptors.is_empty() {
            debug!(interface = %ifname, "Extcap returned no arguments");
            return Err(Error::NoArguments {
                interface: ifname.to_string(),
            });
        }

        if enabled!(Level::TRACE) {
            for descriptor in &descriptors {
                trace!(interface = %ifname, "{}", descriptor);
            }
        }

        Ok(descriptors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoker::ProviderOutput;
    use extcap_core::{ArgType, InterfaceKind, InterfaceRecord, LinkTypeRecord};
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::path::Path;
    use tempfile::TempDir;

    /// Line based test grammar:
    /// `interface <call> <display>`, `dlt <number> <name> <display>`, `arg <number> <call> <display>`
    struct LineParser;

    fn fields(output: &str, tag: &str, count: usize) -> Vec<Vec<String>> {
        output
            .lines()
            .filter_map(|line| line.strip_prefix(tag))
            .map(|rest| rest.trim().splitn(count, ' ').map(str::to_string).collect())
            .collect()
    }

    impl OutputParser for LineParser {
        fn parse_interfaces(&self, output: &str) -> Vec<InterfaceRecord> {
            fields(output, "interface", 2)
                .into_iter()
                .map(|f| InterfaceRecord::new(f[0].clone(), f[1].clone()))
                .collect()
        }

        fn parse_link_types(&self, output: &str) -> Vec<LinkTypeRecord> {
            fields(output, "dlt", 3)
                .into_iter()
                .map(|f| LinkTypeRecord::new(f[0].parse().unwrap(), f[1].clone(), f[2].clone()))
                .collect()
        }

        fn parse_arguments(&self, output: &str) -> Vec<ArgumentDescriptor> {
            fields(output, "arg", 3)
                .into_iter()
                .map(|f| {
                    ArgumentDescriptor::new(f[0].parse().unwrap(), f[1].clone(), f[2].clone(), ArgType::String)
                })
                .collect()
        }
    }

    /// Answers per provider file name and query flag
    #[derive(Default)]
    struct FakeProviders {
        outputs: HashMap<(String, String), String>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeProviders {
        fn answer(mut self, provider: &str, query: &str, stdout: &str) -> Self {
            self.outputs
                .insert((provider.to_string(), query.to_string()), stdout.to_string());
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    impl Invoker for FakeProviders {
        fn invoke(&self, program: &Path, args: &[&str], _working_dir: &Path) -> Result<ProviderOutput> {
            let name = program.file_name().unwrap().to_string_lossy().into_owned();
            let query = args.first().copied().unwrap_or_default().to_string();
            self.calls.lock().push(format!("{} {}", name, args.join(" ")));

            match self.outputs.get(&(name, query)) {
                Some(stdout) => Ok(ProviderOutput {
                    exit_code: Some(0),
                    stdout: stdout.clone(),
                }),
                None => Ok(ProviderOutput {
                    exit_code: Some(1),
                    stdout: String::new(),
                }),
            }
        }
    }

    fn provider_dir(names: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in names {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        dir
    }

    fn discovery(dir: &TempDir, providers: FakeProviders) -> ExtcapDiscovery<LineParser, FakeProviders> {
        ExtcapDiscovery::with_invoker(ExtcapConfig::new(dir.path()), LineParser, providers)
    }

    #[test]
    fn test_list_interfaces_first_provider_wins() {
        let dir = provider_dir(&["a", "b"]);
        let providers = FakeProviders::default()
            .answer("a", "--extcap-interfaces", "interface eth0 Ethernet from A")
            .answer(
                "b",
                "--extcap-interfaces",
                "interface eth0 Ethernet from B\ninterface usb0 USB from B",
            );
        let discovery = discovery(&dir, providers);

        let interfaces = discovery.list_interfaces();

        let names: Vec<&str> = interfaces.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["eth0", "usb0"]);
        assert_eq!(interfaces[0].friendly_name, "Ethernet from A");
        assert_eq!(interfaces[0].provider_path, dir.path().join("a"));
        assert_eq!(interfaces[0].kind, InterfaceKind::Extcap);
        assert_eq!(interfaces[1].provider_path, dir.path().join("b"));

        assert_eq!(discovery.provider_for("eth0"), Some(dir.path().join("a")));
        assert!(discovery.interface_exists("usb0"));
        assert!(!discovery.interface_exists("wlan0"));
    }

    #[test]
    fn test_list_interfaces_reversed_order_after_reset() {
        let dir = provider_dir(&["a", "b"]);
        let providers = FakeProviders::default()
            .answer("a", "--extcap-interfaces", "interface eth0 Ethernet from A")
            .answer("b", "--extcap-interfaces", "interface eth0 Ethernet from B");
        let registry = Arc::new(InterfaceRegistry::new());
        let first = discovery(&dir, providers).with_registry(registry.clone());
        first.list_interfaces();
        assert_eq!(registry.lookup("eth0"), Some(dir.path().join("a")));

        // Same providers, scan order reversed by renaming
        std::fs::rename(dir.path().join("a"), dir.path().join("c")).unwrap();
        let providers = FakeProviders::default()
            .answer("c", "--extcap-interfaces", "interface eth0 Ethernet from A")
            .answer("b", "--extcap-interfaces", "interface eth0 Ethernet from B");
        let second = discovery(&dir, providers).with_registry(registry.clone());

        let interfaces = second.list_interfaces();
        assert_eq!(interfaces.len(), 1);
        assert_eq!(interfaces[0].friendly_name, "Ethernet from B");
        assert_eq!(registry.lookup("eth0"), Some(dir.path().join("b")));
    }

    #[test]
    fn test_list_interfaces_tolerates_broken_provider() {
        let dir = provider_dir(&["a_broken", "b_good"]);
        let providers =
            FakeProviders::default().answer("b_good", "--extcap-interfaces", "interface usb0 USB");
        let discovery = discovery(&dir, providers);

        let interfaces = discovery.list_interfaces();
        assert_eq!(interfaces.len(), 1);
        assert_eq!(interfaces[0].name, "usb0");
    }

    #[test]
    fn test_get_capabilities() {
        let dir = provider_dir(&["a"]);
        let providers = FakeProviders::default()
            .answer("a", "--extcap-interfaces", "interface eth0 Ethernet")
            .answer("a", "--extcap-dlts", "dlt 1 EN10MB Ethernet\ndlt 147 USER0 User 0");
        let discovery = discovery(&dir, providers);
        discovery.list_interfaces();

        let caps = discovery.get_capabilities("eth0").unwrap();

        assert!(!caps.can_set_monitor_mode);
        assert_eq!(caps.link_types.len(), 2);
        assert_eq!(caps.link_types[0].dlt, 1);
        assert_eq!(caps.link_types[0].name, "EN10MB");
        assert_eq!(caps.link_types[1].dlt, 147);
        assert_eq!(caps.link_types[1].name, "USER0");
        assert_eq!(caps.link_types[1].description, "User 0");

        let calls = discovery.invoker.calls();
        assert_eq!(calls.last().unwrap(), "a --extcap-dlts --extcap-interface eth0");
    }

    #[test]
    fn test_get_capabilities_no_link_types() {
        let dir = provider_dir(&["a"]);
        let providers = FakeProviders::default()
            .answer("a", "--extcap-interfaces", "interface eth0 Ethernet")
            .answer("a", "--extcap-dlts", "");
        let discovery = discovery(&dir, providers);
        discovery.list_interfaces();

        let result = discovery.get_capabilities("eth0");
        match result {
            Err(Error::NoLinkTypes { interface }) => assert_eq!(interface, "eth0"),
            other => panic!("Expected NoLinkTypes, got {:?}", other),
        }
    }

    #[test]
    fn test_get_capabilities_unknown_interface() {
        let dir = provider_dir(&["a"]);
        let discovery = discovery(&dir, FakeProviders::default());

        assert!(matches!(
            discovery.get_capabilities("eth0"),
            Err(Error::InterfaceNotFound(_))
        ));
        assert!(discovery.invoker.calls().is_empty());
    }

    #[test]
    fn test_get_capabilities_only_queries_owner() {
        let dir = provider_dir(&["a", "b"]);
        let providers = FakeProviders::default()
            .answer("a", "--extcap-interfaces", "interface usb0 USB")
            .answer("b", "--extcap-interfaces", "interface eth0 Ethernet")
            .answer("a", "--extcap-dlts", "dlt 220 USB_LINUX_MMAPPED USB")
            .answer("b", "--extcap-dlts", "dlt 1 EN10MB Ethernet");
        let discovery = discovery(&dir, providers);
        discovery.list_interfaces();

        let caps = discovery.get_capabilities("eth0").unwrap();
        assert_eq!(caps.link_types[0].dlt, 1);

        let dlt_calls: Vec<String> = discovery
            .invoker
            .calls()
            .into_iter()
            .filter(|c| c.contains("--extcap-dlts"))
            .collect();
        assert_eq!(dlt_calls, vec!["b --extcap-dlts --extcap-interface eth0"]);
    }

    #[test]
    fn test_get_capabilities_failing_provider() {
        let dir = provider_dir(&["a"]);
        let providers = FakeProviders::default().answer("a", "--extcap-interfaces", "interface eth0 Ethernet");
        let discovery = discovery(&dir, providers);
        discovery.list_interfaces();

        assert!(matches!(
            discovery.get_capabilities("eth0"),
            Err(Error::ProviderFailed { .. })
        ));
    }

    #[test]
    fn test_get_configuration() {
        let dir = provider_dir(&["a"]);
        let providers = FakeProviders::default()
            .answer("a", "--extcap-interfaces", "interface eth0 Ethernet")
            .answer("a", "--extcap-config", "arg 0 --delay Delay\narg 1 --count Packet count");
        let discovery = discovery(&dir, providers);
        discovery.list_interfaces();

        let arguments = discovery.get_configuration("eth0").unwrap();
        assert_eq!(arguments.len(), 2);
        assert_eq!(arguments[0].call, "--delay");
        assert_eq!(arguments[1].display, "Packet count");
    }

    #[test]
    fn test_get_configuration_unknown_interface() {
        let dir = provider_dir(&["a"]);
        let discovery = discovery(&dir, FakeProviders::default());

        assert!(discovery.get_configuration("eth0").unwrap().is_empty());
        assert!(discovery.invoker.calls().is_empty());
    }

    #[test]
    fn test_get_configuration_no_arguments() {
        let dir = provider_dir(&["a"]);
        let providers = FakeProviders::default()
            .answer("a", "--extcap-interfaces", "interface eth0 Ethernet")
            .answer("a", "--extcap-config", "");
        let discovery = discovery(&dir, providers);
        discovery.list_interfaces();

        match discovery.get_configuration("eth0") {
            Err(Error::NoArguments { interface }) => assert_eq!(interface, "eth0"),
            other => panic!("Expected NoArguments, got {:?}", other),
        }
    }

    #[test]
    fn test_get_configuration_failing_provider() {
        let dir = provider_dir(&["a"]);
        let providers =
            FakeProviders::default().answer("a", "--extcap-interfaces", "interface eth0 Ethernet");
        let discovery = discovery(&dir, providers);
        discovery.list_interfaces();

        match discovery.get_configuration("eth0") {
            Err(Error::ProviderFailed {
                provider, reason, ..
            }) => {
                assert_eq!(provider, dir.path().join("a"));
                assert!(reason.contains("exit code 1"));
            }
            other => panic!("Expected ProviderFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_get_configuration_queries_owner_only() {
        let dir = provider_dir(&["a", "b"]);
        let registry = Arc::new(InterfaceRegistry::new());
        registry.register("eth0", dir.path().join("b"));
        let providers = FakeProviders::default()
            .answer("a", "--extcap-config", "arg 0 --first First")
            .answer("b", "--extcap-config", "arg 0 --second Second");
        let discovery = discovery(&dir, providers).with_registry(registry);

        let arguments = discovery.get_configuration("eth0").unwrap();
        assert_eq!(arguments.len(), 1);
        assert_eq!(arguments[0].call, "--second");
        assert_eq!(
            discovery.invoker.calls(),
            vec!["b --extcap-config --extcap-interface eth0"]
        );
    }
}
