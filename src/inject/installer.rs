//! Installs generated clients into injection sites.

use crate::client::ClientFactory;
use crate::error::InstallError;
use crate::inject::site::{Injectable, SiteShape};
use crate::observability::metrics;

/// Final state of one injection site after an install pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteState {
    /// The slot received freshly created clients.
    Installed,
    /// The slot already held a value and was left untouched.
    Skipped,
}

/// Outcome for one site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteReport {
    pub field: &'static str,
    pub interface: &'static str,
    pub shape: SiteShape,
    pub backends: Vec<String>,
    pub state: SiteState,
}

/// Outcome of [`Installer::install`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    pub sites: Vec<SiteReport>,
}

impl InstallReport {
    pub fn installed(&self) -> usize {
        self.count(SiteState::Installed)
    }

    pub fn skipped(&self) -> usize {
        self.count(SiteState::Skipped)
    }

    fn count(&self, state: SiteState) -> usize {
        self.sites.iter().filter(|s| s.state == state).count()
    }
}

/// Wires clients from a [`ClientFactory`] into [`Injectable`] objects.
#[derive(Debug, Clone)]
pub struct Installer {
    factory: ClientFactory,
}

impl Installer {
    pub fn new(factory: ClientFactory) -> Self {
        Self { factory }
    }

    pub fn factory(&self) -> &ClientFactory {
        &self.factory
    }

    /// Fill every unpopulated site of `target`.
    ///
    /// Stops at the first site without backend names; sites handled before
    /// it keep their clients.
    pub fn install<T: Injectable + ?Sized>(
        &self,
        target: &mut T,
    ) -> Result<InstallReport, InstallError> {
        let mut report = InstallReport::default();

        for mut site in target.injection_sites() {
            let mut entry = SiteReport {
                field: site.field(),
                interface: site.interface(),
                shape: site.shape(),
                backends: site.backend_names().to_vec(),
                state: SiteState::Skipped,
            };

            if site.is_populated() {
                tracing::debug!(field = entry.field, "Injection site already populated, skipping");
                metrics::record_install("skipped");
                report.sites.push(entry);
                continue;
            }

            if site.backend_names().is_empty() {
                tracing::error!(
                    field = entry.field,
                    interface = entry.interface,
                    "Injection site declares no backend names"
                );
                metrics::record_install("failed");
                return Err(InstallError::MissingBackendNames {
                    field: entry.field.to_string(),
                });
            }

            site.fill(&self.factory);
            entry.state = SiteState::Installed;
            tracing::info!(
                field = entry.field,
                interface = entry.interface,
                shape = ?entry.shape,
                backends = ?entry.backends,
                "Installed client"
            );
            metrics::record_install("installed");
            report.sites.push(entry);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientHandle, RemoteInterface};
    use crate::dispatch::{BackendDirectory, InboundResponse, OutboundRequest, Transport};
    use crate::error::{ClientResult, TransportError};
    use crate::inject::site::InjectionSite;
    use crate::mapping::{InterfaceDescriptor, MethodSpec};
    use crate::request::Args;
    use futures_util::future::BoxFuture;
    use reqwest::StatusCode;
    use std::collections::HashMap;
    use std::sync::Arc;
    use url::Url;

    struct GreetingTransport;

    impl Transport for GreetingTransport {
        fn execute(
            &self,
            request: OutboundRequest,
        ) -> BoxFuture<'_, Result<InboundResponse, TransportError>> {
            let body = format!("Hi from {}", request.url.path());
            Box::pin(async move { Ok(InboundResponse::new(StatusCode::OK, body)) })
        }
    }

    trait Greeter: Send + Sync {
        fn backend(&self) -> &str;
    }

    #[derive(Debug)]
    struct HelloClient(ClientHandle);

    impl RemoteInterface for HelloClient {
        fn descriptor() -> InterfaceDescriptor {
            InterfaceDescriptor::builder("HelloApi")
                .method("hello", MethodSpec::new().get("/sayHello").query("name"))
                .build()
        }

        fn from_handle(handle: ClientHandle) -> Self {
            Self(handle)
        }
    }

    impl HelloClient {
        async fn hello(&self, name: &str) -> ClientResult<String> {
            self.0.invoke("hello", Args::new().arg(name)?).await
        }
    }

    impl Greeter for HelloClient {
        fn backend(&self) -> &str {
            self.0.backend()
        }
    }

    #[derive(Default)]
    struct Controller {
        hello: Option<HelloClient>,
        replicas: Option<Vec<HelloClient>>,
        by_name: Option<HashMap<String, HelloClient>>,
        greeter: Option<Arc<dyn Greeter>>,
        missing_names: bool,
    }

    impl Injectable for Controller {
        fn injection_sites(&mut self) -> Vec<InjectionSite<'_>> {
            let mut sites = vec![
                InjectionSite::single("hello", &mut self.hello).backends(["provider", "ignored"]),
                InjectionSite::sequence("replicas", &mut self.replicas).backends(["p1", "p2"]),
                InjectionSite::mapping("by_name", &mut self.by_name).backends(["east", "west"]),
            ];
            let greeter = InjectionSite::coerced::<HelloClient, Arc<dyn Greeter>>(
                "greeter",
                &mut self.greeter,
                |c| Arc::new(c),
            );
            let names: &[&str] = if self.missing_names { &[] } else { &["greeter-svc"] };
            sites.push(greeter.backends(names.iter().copied()));
            sites
        }
    }

    fn installer() -> Installer {
        let directory =
            BackendDirectory::new().with_default(Url::parse("http://localhost:8089").unwrap());
        Installer::new(ClientFactory::new(Arc::new(GreetingTransport), Arc::new(directory)))
    }

    #[tokio::test]
    async fn test_installs_every_shape() {
        let mut controller = Controller::default();
        let report = installer().install(&mut controller).unwrap();

        assert_eq!(report.installed(), 4);
        assert_eq!(report.skipped(), 0);
        assert_eq!(report.sites[1].shape, SiteShape::Sequence);

        let hello = controller.hello.as_ref().unwrap();
        assert_eq!(hello.0.backend(), "provider");
        assert_eq!(hello.hello("World").await.unwrap(), "Hi from /provider/sayHello");

        let replicas: Vec<&str> = controller
            .replicas
            .as_ref()
            .unwrap()
            .iter()
            .map(|c| c.0.backend())
            .collect();
        assert_eq!(replicas, vec!["p1", "p2"]);

        let by_name = controller.by_name.as_ref().unwrap();
        assert_eq!(by_name.len(), 2);
        assert_eq!(by_name["west"].0.backend(), "west");

        assert_eq!(controller.greeter.as_ref().unwrap().backend(), "greeter-svc");
    }

    #[test]
    fn test_populated_site_is_left_unchanged() {
        let installer = installer();
        let manual: HelloClient = installer.factory().create_one("manual");
        let mut controller = Controller {
            hello: Some(manual),
            ..Controller::default()
        };

        let report = installer.install(&mut controller).unwrap();
        assert_eq!(report.sites[0].state, SiteState::Skipped);
        assert_eq!(controller.hello.as_ref().unwrap().0.backend(), "manual");
    }

    #[test]
    fn test_second_install_is_a_no_op() {
        let installer = installer();
        let mut controller = Controller::default();
        installer.install(&mut controller).unwrap();

        let report = installer.install(&mut controller).unwrap();
        assert_eq!(report.installed(), 0);
        assert_eq!(report.skipped(), 4);
    }

    #[test]
    fn test_missing_backend_names_aborts_but_keeps_earlier_sites() {
        let mut controller = Controller {
            missing_names: true,
            ..Controller::default()
        };

        let err = installer().install(&mut controller).unwrap_err();
        assert!(matches!(err, InstallError::MissingBackendNames { ref field } if field == "greeter"));
        assert!(controller.hello.is_some());
        assert!(controller.replicas.is_some());
        assert!(controller.by_name.is_some());
        assert!(controller.greeter.is_none());
    }
}
