//! Codec service provider
//!
//! Encodes and decodes YANG data locally, without a device session. The
//! engine compiles one root schema per bundle; the provider caches it so later
//! encode/decode calls for entities of the same bundle reuse it.

use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use crate::config::{EncodingFormat, Repository};
use crate::engine::{Engine, Entity, RootSchemaHandle};
use crate::error::{ProviderError, Result};
use crate::payload;
use crate::session::SessionState;

/// Local XML/JSON codec provider
#[derive(Debug)]
pub struct CodecServiceProvider {
    engine: Rc<dyn Engine>,
    repository: Repository,
    encoding: EncodingFormat,
    root_schemas: HashMap<String, RootSchemaHandle>,
    state: SessionState,
}

impl CodecServiceProvider {
    /// Create a provider with an empty schema cache
    pub fn new(engine: Rc<dyn Engine>, repository: Repository, encoding: EncodingFormat) -> Self {
        Self {
            engine,
            repository,
            encoding,
            root_schemas: HashMap::new(),
            state: SessionState::new(),
        }
    }

    /// Compile the root schema of the entity's bundle unless already cached
    pub fn initialize(&mut self, entity: &dyn Entity) -> Result<()> {
        if !self.state.has_error_record() {
            self.state.allocate_error_record();
        }

        let bundle = entity.bundle_name();
        if self.root_schemas.contains_key(bundle) {
            return Ok(());
        }

        log::info!("codec provider initialized with {} bundle", bundle);
        match self.engine.compile_root_schema(entity, &self.repository) {
            Ok(root) => {
                log::debug!("compiled root schema {:?} for bundle {}", root, bundle);
                self.root_schemas.insert(bundle.to_string(), root);
                Ok(())
            }
            Err(error) => {
                log::warn!("failed to compile bundle {}: {}", bundle, error);
                self.state.record_error(error.clone());
                Err(ProviderError::Engine(error))
            }
        }
    }

    /// Encoding the provider was created with
    pub fn encoding(&self) -> EncodingFormat {
        self.encoding
    }

    /// Directory schemas are compiled from
    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// Error state of the provider
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Root schema of the entity's bundle
    ///
    /// # Panics
    ///
    /// Panics if [`initialize`](Self::initialize) was never called for the
    /// entity's bundle.
    pub fn root_schema_node(&self, entity: &dyn Entity) -> &RootSchemaHandle {
        match self.root_schemas.get(entity.bundle_name()) {
            Some(root) => root,
            None => panic!(
                "root schema node for bundle '{}' not found in provider",
                entity.bundle_name()
            ),
        }
    }

    /// Whether the bundle has a cached root schema
    pub fn is_initialized(&self, bundle: &str) -> bool {
        self.root_schemas.contains_key(bundle)
    }

    /// Modules a payload in the provider's encoding refers to
    ///
    /// XML payloads yield namespace URIs, JSON payloads yield module names.
    /// Unqualified JSON member names are not module names and are skipped.
    pub fn payload_modules(&self, payload: &str) -> Result<BTreeSet<String>> {
        match self.encoding {
            EncodingFormat::Xml => payload::xml_namespaces(payload),
            EncodingFormat::Json => payload::json_module_names(payload),
        }
    }
}
