//! Integration tests driving the providers through a recording engine

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rust_ydk_providers::{
    CodecServiceProvider, ConnectionParams, EncodingFormat, Engine, EngineHandle, EngineResult,
    Entity, ErrorCode, ErrorDescriptor, NetconfConfig, NetconfServiceProvider, NodeProvider,
    OpenDaylightConfig, OpenDaylightServiceProvider, Protocol, ProviderKind, Repository,
    RestconfConfig, RestconfServiceProvider, RootSchemaHandle, ServiceProvider, SessionStatus,
};

/// Engine that records every call it receives
#[derive(Debug, Default)]
struct RecordingEngine {
    next_id: Cell<u64>,
    calls: RefCell<Vec<String>>,
    refuse: Cell<bool>,
}

impl RecordingEngine {
    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn count(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn open(&self, call: String) -> EngineResult<EngineHandle> {
        self.record(call);
        if self.refuse.get() {
            return Err(ErrorDescriptor::new(
                ErrorCode::ServiceProvider,
                "authentication failed",
            ));
        }
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        Ok(EngineHandle::new(id))
    }
}

impl Engine for RecordingEngine {
    fn connect_netconf(&self, config: &NetconfConfig) -> EngineResult<EngineHandle> {
        self.open(format!("connect netconf {}", config.protocol))
    }

    fn connect_restconf(&self, config: &RestconfConfig) -> EngineResult<EngineHandle> {
        self.open(format!(
            "connect restconf {} {}",
            config.state_url_root, config.config_url_root
        ))
    }

    fn connect_opendaylight(&self, config: &OpenDaylightConfig) -> EngineResult<EngineHandle> {
        self.open(format!("connect opendaylight {}", config.connection.address))
    }

    fn disconnect_netconf(&self, handle: EngineHandle) {
        self.record(format!("disconnect netconf {}", handle.id()));
    }

    fn disconnect_restconf(&self, handle: EngineHandle) {
        self.record(format!("disconnect restconf {}", handle.id()));
    }

    fn disconnect_opendaylight(&self, handle: EngineHandle) {
        self.record(format!("disconnect opendaylight {}", handle.id()));
    }

    fn opendaylight_node_ids(&self, _hub: &EngineHandle) -> EngineResult<Vec<String>> {
        self.record("node ids".to_string());
        Ok(vec!["xr-1".into(), "xr-2".into(), "xr-3".into()])
    }

    fn opendaylight_node_provider(
        &self,
        _hub: &EngineHandle,
        node_id: &str,
    ) -> EngineResult<EngineHandle> {
        self.open(format!("node provider {}", node_id))
    }

    fn compile_root_schema(
        &self,
        entity: &dyn Entity,
        repository: &Repository,
    ) -> EngineResult<RootSchemaHandle> {
        self.record(format!(
            "compile {} {}",
            entity.bundle_name(),
            repository.path().display()
        ));
        Ok(RootSchemaHandle::new(self.count("compile") as u64))
    }
}

struct Model {
    bundle: &'static str,
}

impl Entity for Model {
    fn bundle_name(&self) -> &str {
        self.bundle
    }

    fn module_name(&self) -> &str {
        "ydktest-sanity"
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn connection() -> ConnectionParams {
    ConnectionParams::new("127.0.0.1", "admin", "admin", 12022)
}

fn netconf(engine: &Rc<RecordingEngine>) -> NetconfServiceProvider {
    NetconfServiceProvider::new(engine.clone(), NetconfConfig::new(connection()))
}

fn restconf(engine: &Rc<RecordingEngine>) -> RestconfServiceProvider {
    RestconfServiceProvider::new(engine.clone(), RestconfConfig::new(connection()))
}

fn controller(engine: &Rc<RecordingEngine>) -> OpenDaylightServiceProvider {
    OpenDaylightServiceProvider::new(engine.clone(), OpenDaylightConfig::new(connection()))
}

fn providers(engine: &Rc<RecordingEngine>) -> Vec<Box<dyn ServiceProvider>> {
    vec![
        Box::new(netconf(engine)),
        Box::new(restconf(engine)),
        Box::new(controller(engine)),
    ]
}

#[test]
fn test_connect_then_disconnect_clears_state() {
    init_logging();
    let engine = Rc::new(RecordingEngine::default());

    for mut provider in providers(&engine) {
        provider.connect().expect("connect");
        assert_eq!(provider.state().status(), SessionStatus::Connected);
        assert!(provider.private_handle().is_some());

        provider.disconnect();
        assert!(provider.private_handle().is_none());
        assert!(provider.state().error().is_none());
        assert!(!provider.state().has_error_record());
        assert_eq!(provider.state().status(), SessionStatus::Disconnected);
    }
    assert_eq!(engine.count("disconnect"), 3);
}

#[test]
fn test_disconnect_before_connect_is_noop() {
    init_logging();
    let engine = Rc::new(RecordingEngine::default());

    for mut provider in providers(&engine) {
        provider.disconnect();
        provider.disconnect();
        assert_eq!(provider.state().status(), SessionStatus::Uninitialized);
        assert!(provider.private_handle().is_none());
    }
    assert!(engine.calls.borrow().is_empty());
}

#[test]
fn test_double_disconnect_releases_once() {
    let engine = Rc::new(RecordingEngine::default());
    let mut provider = netconf(&engine);

    provider.connect().unwrap();
    provider.disconnect();
    provider.disconnect();
    assert_eq!(engine.count("disconnect netconf"), 1);
}

#[test]
fn test_failed_connect_is_visible_in_state() {
    let engine = Rc::new(RecordingEngine::default());
    engine.refuse.set(true);
    let mut provider = restconf(&engine);

    assert!(provider.connect().is_err());
    let error = provider.state().error().expect("error recorded");
    assert_eq!(error.code, ErrorCode::ServiceProvider);
    assert_eq!(error.message, "authentication failed");
    assert!(provider.private_handle().is_none());

    provider.disconnect();
    assert_eq!(engine.count("disconnect"), 0);
}

#[test]
fn test_engine_sees_defaulted_config() {
    let engine = Rc::new(RecordingEngine::default());

    let mut ncc = netconf(&engine);
    ncc.connect().unwrap();

    let mut restconf_config = RestconfConfig::new(connection());
    restconf_config.state_url_root = "/operational".into();
    let mut rcc = RestconfServiceProvider::new(engine.clone(), restconf_config);
    rcc.connect().unwrap();

    let calls = engine.calls.borrow();
    assert_eq!(calls[0], "connect netconf ssh");
    assert_eq!(calls[1], "connect restconf /operational /data");
}

#[test]
fn test_config_changes_after_connect_do_not_reconnect() {
    let engine = Rc::new(RecordingEngine::default());
    let mut provider = netconf(&engine);

    provider.connect().unwrap();
    provider.config_mut().connection.address = "10.1.1.1".into();
    assert_eq!(engine.count("connect"), 1);
    assert!(provider.state().is_connected());
}

#[test]
fn test_node_providers_follow_downstream_protocol() {
    init_logging();
    let engine = Rc::new(RecordingEngine::default());

    for (protocol, kind) in [
        (Protocol::Restconf, ProviderKind::Restconf),
        (Protocol::Netconf, ProviderKind::Netconf),
    ] {
        let config = OpenDaylightConfig {
            repository: Repository::new("/opt/odl/cache"),
            encoding: EncodingFormat::Json,
            protocol,
            ..OpenDaylightConfig::new(connection())
        };
        let mut odl = OpenDaylightServiceProvider::new(engine.clone(), config);
        odl.connect().unwrap();

        let node = odl.node_provider("xr-1").unwrap();
        let node = node.borrow();
        assert_eq!(node.kind(), kind);
        assert!(node.state().is_connected());

        let params = match &*node {
            NodeProvider::Netconf(p) => {
                assert!(p.config().repository.is_unset());
                p.config().connection.clone()
            }
            NodeProvider::Restconf(p) => {
                assert!(p.config().repository.is_unset());
                assert_eq!(p.encoding(), EncodingFormat::Xml);
                p.config().connection.clone()
            }
        };
        assert_eq!(params, connection());
    }
}

#[test]
fn test_node_providers_are_independent() {
    let engine = Rc::new(RecordingEngine::default());
    let mut odl = controller(&engine);
    odl.connect().unwrap();

    let ids = odl.node_ids().unwrap();
    let nodes: Vec<_> = ids
        .iter()
        .map(|id| odl.node_provider(id).unwrap())
        .collect();
    assert_eq!(odl.providers().len(), ids.len());

    nodes[1].borrow_mut().disconnect();
    assert!(nodes[0].borrow().state().is_connected());
    assert!(!nodes[1].borrow().state().is_connected());
    assert!(nodes[2].borrow().state().is_connected());
    assert_eq!(engine.count("disconnect netconf"), 1);
    assert!(odl.state().is_connected());
}

#[test]
fn test_hub_keeps_node_providers_alive() {
    let engine = Rc::new(RecordingEngine::default());
    let mut odl = controller(&engine);
    odl.connect().unwrap();

    drop(odl.node_provider("xr-2").unwrap());
    assert_eq!(engine.count("disconnect netconf"), 0);
    assert!(odl.providers()[0].borrow().state().is_connected());

    drop(odl);
    assert_eq!(engine.count("disconnect opendaylight"), 1);
    assert_eq!(engine.count("disconnect netconf"), 1);
}

#[test]
fn test_hub_teardown_releases_nodes_before_itself() {
    let engine = Rc::new(RecordingEngine::default());
    let mut odl = controller(&engine);
    odl.connect().unwrap();

    drop(odl.node_provider("xr-1").unwrap());
    drop(odl);

    let calls = engine.calls.borrow();
    assert_eq!(
        *calls,
        vec![
            "connect opendaylight 127.0.0.1",
            "node provider xr-1",
            "disconnect netconf 2",
            "disconnect opendaylight 1",
        ]
    );
}

#[test]
fn test_hub_disconnect_disconnects_nodes() {
    let engine = Rc::new(RecordingEngine::default());
    let mut odl = controller(&engine);
    odl.connect().unwrap();

    let node = odl.node_provider("xr-3").unwrap();
    odl.disconnect();
    assert!(!odl.state().is_connected());
    assert!(!node.borrow().state().is_connected());
    assert!(odl.providers().is_empty());

    // reconnecting starts with an empty node list
    odl.connect().unwrap();
    assert!(odl.providers().is_empty());
    assert_eq!(engine.count("disconnect"), 2);
}

#[test]
fn test_codec_compiles_each_bundle_once() {
    init_logging();
    let engine = Rc::new(RecordingEngine::default());
    let mut codec = CodecServiceProvider::new(
        engine.clone(),
        Repository::new("/tmp/ydk"),
        EncodingFormat::Xml,
    );

    let runner = Model { bundle: "ydktest" };
    let other = Model { bundle: "ydktest" };
    let ietf = Model { bundle: "ietf" };

    codec.initialize(&runner).unwrap();
    codec.initialize(&other).unwrap();
    assert_eq!(engine.count("compile"), 1);
    assert_eq!(engine.calls.borrow()[0], "compile ydktest /tmp/ydk");

    codec.initialize(&ietf).unwrap();
    assert_eq!(engine.count("compile"), 2);

    let root = codec.root_schema_node(&runner).clone();
    assert_eq!(codec.root_schema_node(&other), &root);
    assert_eq!(codec.root_schema_node(&runner), &root);
    assert_eq!(codec.encoding(), EncodingFormat::Xml);
}

#[test]
#[should_panic]
fn test_codec_unknown_bundle_panics() {
    let engine = Rc::new(RecordingEngine::default());
    let codec = CodecServiceProvider::new(engine, Repository::default(), EncodingFormat::Json);

    codec.root_schema_node(&Model { bundle: "never" });
}

#[test]
fn test_provider_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("restconf.json");
    std::fs::write(
        &path,
        r#"{"address": "localhost", "username": "admin", "password": "admin",
            "port": 8008, "encoding": "json", "config-url-root": "/config"}"#,
    )
    .unwrap();

    let config = RestconfConfig::from_file(&path).unwrap();
    assert_eq!(config.encoding, EncodingFormat::Json);
    assert!(config.state_url_root.is_empty());

    let engine = Rc::new(RecordingEngine::default());
    let mut provider = RestconfServiceProvider::new(engine.clone(), config);
    provider.connect().unwrap();
    assert_eq!(engine.calls.borrow()[0], "connect restconf /data /config");
}
