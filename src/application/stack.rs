//! Stack construction
//!
//! A stack is a named deployable unit. It is created against an [`App`],
//! which fixes its output directory, and is registered back with
//! [`App::add_stack`] once all constructs are declared.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::App;
use crate::domain::entities::{
    Asset, ModuleCall, ModuleRef, Output, Provider, Resource, ResourceRef,
};
use crate::domain::ports::Packager;
use crate::domain::resources::TypedResource;
use crate::domain::value_objects::{AssetType, ConstructId};
use crate::error::{StackError, StackResult};

/// Directory (relative to the stack directory) holding staged assets
pub const ASSETS_DIR: &str = "assets";

/// A named group of declared constructs
pub struct Stack {
    name: ConstructId,
    dir: PathBuf,
    packager: Arc<dyn Packager>,
    providers: Vec<Provider>,
    resources: Vec<Resource>,
    assets: Vec<Asset>,
    outputs: Vec<Output>,
    modules: Vec<ModuleCall>,
}

impl std::fmt::Debug for Stack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stack")
            .field("name", &self.name)
            .field("dir", &self.dir)
            .field("providers", &self.providers.len())
            .field("resources", &self.resources.len())
            .field("assets", &self.assets.len())
            .finish()
    }
}

fn duplicate(kind: &str, id: impl ToString) -> StackError {
    StackError::DuplicateId {
        kind: kind.to_string(),
        id: id.to_string(),
    }
}

impl Stack {
    /// Create a stack scoped to `app`.
    ///
    /// The stack is not part of the app until passed to [`App::add_stack`].
    pub fn new(app: &App, name: &str) -> StackResult<Self> {
        let name = ConstructId::new(name)?;
        let dir = app.stack_dir(&name);
        Ok(Self {
            name,
            dir,
            packager: app.packager(),
            providers: Vec::new(),
            resources: Vec::new(),
            assets: Vec::new(),
            outputs: Vec::new(),
            modules: Vec::new(),
        })
    }

    pub fn name(&self) -> &ConstructId {
        &self.name
    }

    /// `<outdir>/stacks/<name>`
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    pub fn modules(&self) -> &[ModuleCall] {
        &self.modules
    }

    pub fn asset(&self, id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id().as_str() == id)
    }

    pub fn resource(&self, resource_type: &str, id: &str) -> Option<&Resource> {
        self.resources
            .iter()
            .find(|r| r.resource_type() == resource_type && r.id().as_str() == id)
    }

    pub fn add_provider(&mut self, provider: Provider) -> StackResult<()> {
        let key = provider.key();
        if self.providers.iter().any(|p| p.key() == key) {
            return Err(duplicate("provider", key));
        }
        self.providers.push(provider);
        Ok(())
    }

    /// Register a resource after validating its required attributes.
    pub fn add_resource(&mut self, resource: Resource) -> StackResult<ResourceRef> {
        resource.validate()?;
        if self
            .resource(resource.resource_type(), resource.id().as_str())
            .is_some()
        {
            return Err(duplicate("resource", resource.address()));
        }
        let handle = ResourceRef::new(&resource);
        tracing::debug!(stack = %self.name, address = %resource.address(), "declared resource");
        self.resources.push(resource);
        Ok(handle)
    }

    /// Register a typed resource shape.
    pub fn add<R: TypedResource>(&mut self, id: &str, shape: R) -> StackResult<ResourceRef> {
        self.add_resource(shape.into_resource(id)?)
    }

    /// Package `source` and register it as an asset.
    ///
    /// The artifact is staged immediately under
    /// `<stack dir>/assets/<id>/<short-hash>/`. Versions left there by
    /// earlier content are removed afterwards.
    pub fn add_asset(
        &mut self,
        id: &str,
        source: impl AsRef<Path>,
        asset_type: AssetType,
    ) -> StackResult<Asset> {
        let id = ConstructId::new(id)?;
        if self.asset(id.as_str()).is_some() {
            return Err(duplicate("asset", &id));
        }

        let source = source.as_ref();
        let staging = self.dir.join(ASSETS_DIR).join(id.as_str());
        let artifact = self.packager.package(source, asset_type, &staging)?;
        match self.packager.prune(&staging, artifact.hash.short()) {
            Ok(0) => {}
            Ok(removed) => {
                tracing::debug!(stack = %self.name, asset = %id, removed, "pruned stale asset versions")
            }
            Err(err) => {
                tracing::warn!(stack = %self.name, asset = %id, error = %err, "could not prune stale asset versions")
            }
        }

        let relative = match artifact.staged_path.strip_prefix(&self.dir) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => Path::new(ASSETS_DIR)
                .join(id.as_str())
                .join(artifact.hash.short())
                .join(&artifact.file_name),
        };

        let asset = Asset::new(id, asset_type, source, artifact, &relative);
        tracing::debug!(
            stack = %self.name,
            asset = %asset.id(),
            file_name = asset.file_name(),
            "registered asset"
        );
        self.assets.push(asset.clone());
        Ok(asset)
    }

    pub fn add_output(&mut self, output: Output) -> StackResult<()> {
        if self.outputs.iter().any(|o| o.id() == output.id()) {
            return Err(duplicate("output", output.id()));
        }
        self.outputs.push(output);
        Ok(())
    }

    pub fn add_module(&mut self, module: ModuleCall) -> StackResult<ModuleRef> {
        if self.modules.iter().any(|m| m.id() == module.id()) {
            return Err(duplicate("module", module.id()));
        }
        let handle = ModuleRef::new(&module);
        self.modules.push(module);
        Ok(handle)
    }
}
