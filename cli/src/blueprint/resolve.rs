//! # Override Resolution, Templates and Copies
//!
//! File: cli/src/blueprint/resolve.rs
//!
//! ## Overview
//!
//! The per-file steps of `resolve_files`:
//!
//! - **Overrides**: a file ejected to `src_dir/app_dir/<id>/<rel>` replaces
//!   the blueprint's own source. The app root is checked first; when it is
//!   missing no per-file checks run. Per-file checks run concurrently.
//! - **Templates**: files whose name carries a template marker are
//!   registered with the host for rendering (see
//!   [`template_output_name`](super::paths::template_output_name)).
//! - **Copies**: everything else is copied to `build_dir/<destination>`.
//!
//! Every classified file is recorded in the blueprint's mapping. A failed
//! copy is logged and only affects that file.
//!
use super::paths::{template_output_name, FileDescriptor};
use super::utils::exists;
use super::Blueprint;
use crate::common::fs::copy;
use crate::host::{Host, TemplateRequest};
use futures_util::future::join_all;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

impl Blueprint {
    /// `src_dir/app_dir/<id>/<rel>`
    pub fn resolve_app_path(&self, host: &Host, destination_relative: &Path) -> PathBuf {
        let options = host.options();
        options
            .src_dir
            .join(&options.app_dir)
            .join(&self.id)
            .join(destination_relative)
    }

    /// Replaces sources with app overrides where they exist.
    pub async fn resolve_app_overrides(
        &self,
        host: &Host,
        descriptors: Vec<FileDescriptor>,
    ) -> Vec<FileDescriptor> {
        let app_root = self.resolve_app_path(host, Path::new(""));
        if !exists(&app_root).await {
            return descriptors;
        }

        let checks = descriptors.into_iter().map(|mut descriptor| {
            let app_path = self.resolve_app_path(host, &descriptor.destination_relative);
            async move {
                if exists(&app_path).await {
                    debug!(
                        "Using app override {:?} for '{}'",
                        app_path,
                        descriptor.key()
                    );
                    descriptor.source = Some(app_path);
                }
                descriptor
            }
        });
        join_all(checks).await
    }

    /// Registers the file as a template when its name says so.
    ///
    /// Returns the template's output path, or the unchanged source for a
    /// static file. `None` when the descriptor has no source.
    pub fn add_template_if_needed(
        &mut self,
        host: &mut Host,
        descriptor: &FileDescriptor,
    ) -> Option<PathBuf> {
        let source = descriptor.source.clone()?;

        match template_output_name(descriptor, &self.id) {
            Some(file_name) => {
                let output = host.add_template(TemplateRequest {
                    src: source,
                    file_name,
                    variables: Some(self.template_vars().clone()),
                });
                self.record(descriptor.key(), output.dst.clone());
                Some(output.dst)
            }
            None => {
                self.record(descriptor.key(), source.clone());
                Some(source)
            }
        }
    }

    /// Templates return their output path; static files are copied and
    /// return their destination. `None` when there is no source or the copy
    /// failed.
    pub async fn add_template_or_copy(
        &mut self,
        host: &mut Host,
        descriptor: &FileDescriptor,
    ) -> Option<PathBuf> {
        let source = descriptor.source.clone()?;
        let dest = self.add_template_if_needed(host, descriptor)?;

        if dest != source {
            return Some(dest);
        }
        self.copy_file(host, &source, &descriptor.destination)
            .await
            .map(|_| descriptor.destination.clone())
    }

    async fn copy_file(&self, host: &Host, source: &Path, destination: &Path) -> Option<PathBuf> {
        let options = host.options();
        let target = if destination.is_absolute() {
            destination.to_path_buf()
        } else {
            options.build_dir.join(destination)
        };
        let shown_src = pathdiff::diff_paths(source, &options.src_dir)
            .unwrap_or_else(|| source.to_path_buf());
        let shown_dst = pathdiff::diff_paths(&target, &options.build_dir)
            .unwrap_or_else(|| target.clone());

        debug!(
            "{}: Copying '{}' to '{}'",
            self.kind.name,
            shown_src.display(),
            shown_dst.display()
        );
        if target == source {
            error!(
                "{}: Refusing to copy '{}' onto itself",
                self.kind.name,
                shown_src.display()
            );
            return None;
        }
        match copy::copy_file(source, &target).await {
            Ok(_) => Some(target),
            Err(e) => {
                error!(
                    "{}: An error occurred while copying '{}' to '{}': {:?}",
                    self.kind.name,
                    shown_src.display(),
                    shown_dst.display(),
                    e
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::guard::GuardRegistry;
    use crate::blueprint::options::BlueprintOptions;
    use crate::blueprint::BlueprintKind;
    use crate::host::HostOptions;
    use std::fs;
    use tempfile::tempdir;

    fn blueprint(dir: &Path) -> Blueprint {
        Blueprint::new(
            BlueprintKind::BASE,
            BlueprintOptions::with_dir(dir),
            GuardRegistry::new(),
        )
        .unwrap()
    }

    fn descriptor(bp_dir: &Path, rel: &str) -> FileDescriptor {
        FileDescriptor {
            source: Some(bp_dir.join(rel)),
            destination: Path::new("blueprint").join(rel),
            destination_relative: PathBuf::from(rel),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_copy_onto_source_is_refused() {
        let dir = tempdir().unwrap();
        let bp_dir = dir.path().join("bp");
        fs::create_dir_all(&bp_dir).unwrap();
        let source = bp_dir.join("a.js");
        fs::write(&source, "keep me").unwrap();

        let mut host = Host::new(HostOptions::new(dir.path()));
        let mut bp = blueprint(&bp_dir);
        let descriptor = FileDescriptor::new(&source, &source);
        assert_eq!(bp.add_template_or_copy(&mut host, &descriptor).await, None);
        assert_eq!(fs::read_to_string(&source).unwrap(), "keep me");
    }

    #[tokio::test]
    async fn test_overrides_missing_app_root_returns_input() {
        let dir = tempdir().unwrap();
        let host = Host::new(HostOptions::new(dir.path()));
        let bp = blueprint(&dir.path().join("bp"));

        let input = vec![descriptor(&dir.path().join("bp"), "layouts/docs.vue")];
        let output = bp.resolve_app_overrides(&host, input.clone()).await;
        assert_eq!(output, input);
    }

    #[tokio::test]
    async fn test_overrides_replace_source_only() {
        let dir = tempdir().unwrap();
        let bp_dir = dir.path().join("bp");
        let override_path = dir.path().join("app/blueprint/layouts/docs.vue");
        fs::create_dir_all(override_path.parent().unwrap()).unwrap();
        fs::write(&override_path, "override").unwrap();

        let host = Host::new(HostOptions::new(dir.path()));
        let bp = blueprint(&bp_dir);
        assert_eq!(
            bp.resolve_app_path(&host, Path::new("layouts/docs.vue")),
            override_path
        );

        let input = vec![
            descriptor(&bp_dir, "layouts/docs.vue"),
            descriptor(&bp_dir, "layouts/other.vue"),
        ];
        let output = bp.resolve_app_overrides(&host, input.clone()).await;

        assert_eq!(output[0].source, Some(override_path));
        assert_eq!(output[0].destination_relative, input[0].destination_relative);
        assert_eq!(output[0].destination, input[0].destination);
        assert_eq!(output[1], input[1]);
    }

    #[tokio::test]
    async fn test_static_file_copied_byte_for_byte() {
        let dir = tempdir().unwrap();
        let bp_dir = dir.path().join("bp");
        let payload: Vec<u8> = vec![0, 159, 146, 150, 255];
        fs::create_dir_all(bp_dir.join("modules")).unwrap();
        fs::write(bp_dir.join("modules/my-module.js"), &payload).unwrap();

        let mut host = Host::new(HostOptions::new(dir.path()));
        let mut bp = blueprint(&bp_dir);
        let d = descriptor(&bp_dir, "modules/my-module.js");

        // Classification alone leaves the source untouched.
        assert_eq!(bp.add_template_if_needed(&mut host, &d), d.source.clone());
        assert!(host.templates.is_empty());

        let dest = bp.add_template_or_copy(&mut host, &d).await;
        assert_eq!(dest, Some(PathBuf::from("blueprint/modules/my-module.js")));
        let copied = fs::read(host.build_dir().join("blueprint/modules/my-module.js")).unwrap();
        assert_eq!(copied, payload);
    }

    #[tokio::test]
    async fn test_template_registered_not_copied() {
        let dir = tempdir().unwrap();
        let bp_dir = dir.path().join("bp");
        let mut host = Host::new(HostOptions::new(dir.path()));
        let mut bp = blueprint(&bp_dir);
        let d = descriptor(&bp_dir, "plugins/my-plugin.$tmpl.js");

        let dest = bp.add_template_or_copy(&mut host, &d).await;
        assert_eq!(dest, Some(PathBuf::from("blueprint/plugins/my-plugin.blueprint.js")));
        assert_eq!(host.templates.len(), 1);
        assert_eq!(
            host.templates[0].variables.as_ref().unwrap().get("id").unwrap(),
            "blueprint"
        );
        assert!(!host.build_dir().exists());
    }

    #[tokio::test]
    async fn test_copy_failure_is_isolated() {
        let dir = tempdir().unwrap();
        let bp_dir = dir.path().join("bp");
        fs::create_dir_all(&bp_dir).unwrap();
        fs::write(bp_dir.join("ok.js"), "ok").unwrap();

        let mut host = Host::new(HostOptions::new(dir.path()));
        let mut bp = blueprint(&bp_dir);

        let missing = descriptor(&bp_dir, "missing.js");
        let ok = descriptor(&bp_dir, "ok.js");
        assert_eq!(bp.add_template_or_copy(&mut host, &missing).await, None);
        assert_eq!(
            bp.add_template_or_copy(&mut host, &ok).await,
            Some(PathBuf::from("blueprint/ok.js"))
        );
    }
}
