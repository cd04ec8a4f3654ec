//! Test doubles for the runtime and the confirmation prompt

use crate::image::version::Version;
use crate::prompt::Confirm;
use crate::runtime::gateway::{
    ContainerFilter, ContainerRecord, ImageRecord, RunSpec, RuntimeGateway,
};
use crate::Result;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// A runtime call recorded by [`FakeRuntime`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Build(Version, PathBuf),
    Run(RunSpec),
    Stop(String),
    RemoveContainer(String),
    RemoveImage(Version),
}

/// In-memory runtime that records every mutating call
#[derive(Default)]
pub struct FakeRuntime {
    images: RefCell<BTreeSet<Version>>,
    containers: RefCell<Vec<ContainerRecord>>,
    actions: RefCell<Vec<Action>>,
}

impl FakeRuntime {
    pub fn with_images(versions: &[&str]) -> Self {
        let runtime = Self::default();
        for raw in versions {
            runtime.images.borrow_mut().insert(v(raw));
        }
        runtime
    }

    /// Add a container of `image` in `state`
    pub fn add_container(&self, id: &str, image: &str, state: &str) {
        self.containers.borrow_mut().push(ContainerRecord {
            id: id.to_string(),
            image: image.to_string(),
            names: format!("name-{}", id),
            state: state.to_string(),
        });
    }

    pub fn catalog(&self) -> Vec<String> {
        self.images
            .borrow()
            .iter()
            .map(|v| v.as_str().to_string())
            .collect()
    }

    pub fn container_ids(&self) -> Vec<String> {
        self.containers.borrow().iter().map(|c| c.id.clone()).collect()
    }

    pub fn actions(&self) -> Vec<Action> {
        self.actions.borrow().clone()
    }
}

impl RuntimeGateway for FakeRuntime {
    async fn list_images(&self) -> Result<Vec<ImageRecord>> {
        Ok(self
            .images
            .borrow()
            .iter()
            .map(|version| ImageRecord {
                version: version.clone(),
                id: format!("id-{}", version),
                size: "800MB".to_string(),
                created_since: "2 days ago".to_string(),
            })
            .collect())
    }

    async fn list_containers(&self, filter: &ContainerFilter) -> Result<Vec<ContainerRecord>> {
        Ok(self
            .containers
            .borrow()
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    async fn build(&self, version: &Version, context: &Path) -> Result<()> {
        self.actions
            .borrow_mut()
            .push(Action::Build(version.clone(), context.to_path_buf()));
        self.images.borrow_mut().insert(version.clone());
        Ok(())
    }

    async fn run(&self, spec: &RunSpec) -> Result<String> {
        self.actions.borrow_mut().push(Action::Run(spec.clone()));
        let id = format!("run-{}", self.containers.borrow().len());
        self.add_container(&id, &spec.version.image_ref(), "running");
        Ok(id)
    }

    async fn stop(&self, container_id: &str) -> Result<()> {
        self.actions
            .borrow_mut()
            .push(Action::Stop(container_id.to_string()));
        for c in self.containers.borrow_mut().iter_mut() {
            if c.id == container_id {
                c.state = "exited".to_string();
            }
        }
        Ok(())
    }

    async fn remove_container(&self, container_id: &str) -> Result<()> {
        self.actions
            .borrow_mut()
            .push(Action::RemoveContainer(container_id.to_string()));
        self.containers.borrow_mut().retain(|c| c.id != container_id);
        Ok(())
    }

    async fn remove_image(&self, version: &Version) -> Result<()> {
        self.actions
            .borrow_mut()
            .push(Action::RemoveImage(version.clone()));
        self.images.borrow_mut().remove(version);
        Ok(())
    }
}

/// Gives a fixed answer and remembers whether it was asked
pub struct ScriptedConfirm {
    answer: bool,
    pub asked: bool,
}

impl ScriptedConfirm {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: false,
        }
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&mut self, _prompt: &str) -> std::io::Result<bool> {
        self.asked = true;
        Ok(self.answer)
    }
}

pub fn v(raw: &str) -> Version {
    Version::parse(raw).unwrap()
}
