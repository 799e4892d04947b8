use async_trait::async_trait;
use object_store::StoreError;
use package_init::clients::PackageClient;
use package_init::context::Context;
use package_init::installer::{InstallError, InstallReport, PackageInstaller};
use package_init::model::{PackageKind, PackageSpecPatch};
use package_init::record::PackageRecord;
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Get(PackageKind, String),
    Create(PackageKind, String),
    Patch(PackageKind, String),
}

/// In-memory `PackageClient` that records every call and can be told to fail
/// writes for given names.
#[derive(Default)]
struct RecordingClient {
    records: Mutex<BTreeMap<(String, String), PackageRecord>>,
    calls: Mutex<Vec<Call>>,
    patch_results: Mutex<Vec<bool>>,
    fail_writes: HashSet<String>,
}

impl RecordingClient {
    fn failing_on(name: &str) -> Self {
        Self {
            fail_writes: HashSet::from([name.to_string()]),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::Get(..)))
            .collect()
    }

    fn patch_results(&self) -> Vec<bool> {
        self.patch_results.lock().unwrap().clone()
    }

    fn stored(&self, kind: PackageKind, name: &str) -> Option<PackageRecord> {
        self.records
            .lock()
            .unwrap()
            .get(&(kind.to_string(), name.to_string()))
            .cloned()
    }

    fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn check_write(&self, record: &PackageRecord) -> Result<(), StoreError> {
        if self.fail_writes.contains(record.name()) {
            return Err(StoreError::ActorClosed);
        }
        Ok(())
    }
}

fn key(kind: PackageKind, name: &str) -> (String, String) {
    (kind.to_string(), name.to_string())
}

#[async_trait]
impl PackageClient for RecordingClient {
    async fn get(
        &self,
        _ctx: &Context,
        kind: PackageKind,
        name: &str,
    ) -> Result<Option<PackageRecord>, StoreError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Get(kind, name.to_string()));
        Ok(self.stored(kind, name))
    }

    async fn create(&self, _ctx: &Context, record: &PackageRecord) -> Result<(), StoreError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Create(record.kind(), record.name().to_string()));
        self.check_write(record)?;

        let mut records = self.records.lock().unwrap();
        let key = key(record.kind(), record.name());
        if records.contains_key(&key) {
            return Err(StoreError::AlreadyExists {
                kind: record.kind().as_str(),
                name: record.name().to_string(),
            });
        }
        records.insert(key, record.clone());
        Ok(())
    }

    async fn patch(&self, _ctx: &Context, record: &PackageRecord) -> Result<bool, StoreError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Patch(record.kind(), record.name().to_string()));
        self.check_write(record)?;

        let mut records = self.records.lock().unwrap();
        let stored = records
            .get_mut(&key(record.kind(), record.name()))
            .ok_or_else(|| StoreError::NotFound {
                kind: record.kind().as_str(),
                name: record.name().to_string(),
            })?;
        let patch = PackageSpecPatch::from(record.spec());
        let changed = match stored {
            PackageRecord::Provider(p) => p.spec.merge(patch),
            PackageRecord::Configuration(c) => c.spec.merge(patch),
        };
        self.patch_results.lock().unwrap().push(changed);
        Ok(changed)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_providers_are_applied_before_configurations() {
    let client = RecordingClient::default();
    let installer = PackageInstaller::new(
        strings(&["crossplane/provider-aws:v1", "crossplane/provider-gcp:v1"]),
        strings(&["crossplane/getting-started:v1"]),
    );

    installer
        .run(&Context::background(), &client)
        .await
        .expect("install should succeed");

    assert_eq!(
        client.writes(),
        vec![
            Call::Create(PackageKind::Provider, "crossplane-provider-aws".into()),
            Call::Create(PackageKind::Provider, "crossplane-provider-gcp".into()),
            Call::Create(PackageKind::Configuration, "crossplane-getting-started".into()),
        ]
    );
    assert_eq!(client.len(), 3);
}

#[tokio::test]
async fn test_applies_every_package_once() {
    let client = RecordingClient::default();
    let installer = PackageInstaller::new(
        strings(&["p1", "p2", "p3"]),
        strings(&["c1", "c2"]),
    );

    installer.run(&Context::background(), &client).await.unwrap();

    let gets = client
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Get(..)))
        .count();
    assert_eq!(gets, 5);
    assert_eq!(client.writes().len(), 5);
    assert!(client.stored(PackageKind::Configuration, "c2").is_some());
}

#[tokio::test]
async fn test_invalid_reference_writes_nothing() {
    let client = RecordingClient::default();
    let installer = PackageInstaller::new(strings(&["ok-ref", "not a valid ref!!"]), vec![]);

    let err = installer
        .run(&Context::background(), &client)
        .await
        .unwrap_err();

    match err {
        InstallError::PackageNameInvalid {
            kind, reference, ..
        } => {
            assert_eq!(kind, PackageKind::Provider);
            assert_eq!(reference, "not a valid ref!!");
        }
        other => panic!("expected PackageNameInvalid, got {other:?}"),
    }
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_invalid_configuration_keeps_providers_unapplied() {
    let client = RecordingClient::default();
    let installer = PackageInstaller::new(strings(&["crossplane/provider-aws"]), strings(&[""]));

    let err = installer
        .run(&Context::background(), &client)
        .await
        .unwrap_err();

    assert!(matches!(err, InstallError::PackageNameInvalid { .. }));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_apply_failure_stops_the_batch() {
    let client = RecordingClient::failing_on("b");
    let installer = PackageInstaller::new(strings(&["a", "b"]), strings(&["c"]));

    let err = installer
        .run(&Context::background(), &client)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "cannot apply package Provider/b");
    match &err {
        InstallError::ApplyFailed { kind, name, source } => {
            assert_eq!(*kind, PackageKind::Provider);
            assert_eq!(name, "b");
            assert!(matches!(source, StoreError::ActorClosed));
        }
        other => panic!("expected ApplyFailed, got {other:?}"),
    }
    assert!(client.stored(PackageKind::Provider, "a").is_some());
    assert!(client.stored(PackageKind::Provider, "b").is_none());
    assert!(client.stored(PackageKind::Configuration, "c").is_none());
}

#[tokio::test]
async fn test_empty_input_makes_no_calls() {
    let client = RecordingClient::default();
    let installer = PackageInstaller::new(vec![], vec![]);

    installer.run(&Context::background(), &client).await.unwrap();

    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_duplicate_reference_is_a_noop_patch() {
    let client = RecordingClient::default();
    let installer = PackageInstaller::new(
        strings(&["crossplane/provider-aws:v1", "crossplane/provider-aws:v1"]),
        vec![],
    );

    let report = installer
        .install(&Context::background(), &client)
        .await
        .unwrap();

    assert_eq!(
        report,
        InstallReport {
            created: 1,
            patched: 0,
            unchanged: 1,
        }
    );
    assert_eq!(client.patch_results(), [false]);

    assert_eq!(
        client.writes(),
        vec![
            Call::Create(PackageKind::Provider, "crossplane-provider-aws".into()),
            Call::Patch(PackageKind::Provider, "crossplane-provider-aws".into()),
        ]
    );
    assert_eq!(client.len(), 1);
}

#[tokio::test]
async fn test_second_run_converges_without_changes() {
    let client = RecordingClient::default();
    let installer = PackageInstaller::new(
        strings(&["xpkg.upbound.io/crossplane/provider-aws:v0.20.0"]),
        strings(&["xpkg.upbound.io/crossplane/getting-started:v1"]),
    );
    let ctx = Context::background();

    let name = "xpkg-upbound-io-crossplane-provider-aws";

    installer.run(&ctx, &client).await.unwrap();
    let after_first = client.stored(PackageKind::Provider, name);

    let report = installer.install(&ctx, &client).await.unwrap();
    let after_second = client.stored(PackageKind::Provider, name);

    assert!(after_first.is_some());
    assert_eq!(after_first, after_second);
    assert_eq!(client.len(), 2);
    assert_eq!(report.unchanged, 2);
    assert_eq!(client.patch_results(), [false, false]);

    let writes = client.writes();
    assert!(matches!(writes[2], Call::Patch(PackageKind::Provider, _)));
    assert!(matches!(writes[3], Call::Patch(PackageKind::Configuration, _)));
}

#[tokio::test]
async fn test_short_reference_is_stored_without_registry() {
    let client = RecordingClient::default();
    let installer = PackageInstaller::new(strings(&["crossplane/provider-aws:v1"]), vec![]);

    installer.run(&Context::background(), &client).await.unwrap();

    let stored = client
        .stored(PackageKind::Provider, "crossplane-provider-aws")
        .expect("provider should be stored");
    assert_eq!(stored.package(), "crossplane/provider-aws:v1");
}
