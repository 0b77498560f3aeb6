//! Output backends.
//!
//! A [`Backend`] serialises a [`Footprint`] into one CAD text format.
//! Backends report recoverable oddities through the warning sink and
//! refuse footprints they cannot express with
//! [`Error::CannotRender`](crate::error::Error::CannotRender).

pub mod geda;
pub mod kicad;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::model::Footprint;

pub use geda::GedaBackend;
pub use kicad::KicadBackend;

/// Receives human-readable warnings during rendering.
pub type WarnSink<'a> = dyn FnMut(&str) + 'a;

/// One output format.
pub trait Backend {
    /// The format name used on the command line.
    fn name(&self) -> &'static str;

    /// Serialises the footprint.
    fn render(&self, footprint: &Footprint, warn: &mut WarnSink) -> Result<String>;
}

/// Format-name lookup for backends, with optional per-generator
/// overrides.
///
/// An override registered for (format, generator) takes priority over the
/// plain format backend, so a generator producing geometry a stock
/// backend handles poorly can ship its own serialiser without forking the
/// format.
#[derive(Default)]
pub struct BackendRegistry {
    backends: IndexMap<&'static str, Box<dyn Backend>>,
    overrides: IndexMap<(String, String), Box<dyn Backend>>,
}

impl BackendRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry of shipped backends.
    #[must_use]
    pub fn builtin() -> Self {
        let mut r = Self::new();
        r.register(Box::new(GedaBackend));
        r.register(Box::new(KicadBackend));
        r
    }

    /// Registers a backend under its own name.
    pub fn register(&mut self, backend: Box<dyn Backend>) {
        self.backends.insert(backend.name(), backend);
    }

    /// Registers an override used only for footprints from `generator`.
    pub fn register_override(
        &mut self,
        format: impl Into<String>,
        generator: impl Into<String>,
        backend: Box<dyn Backend>,
    ) {
        self.overrides
            .insert((format.into(), generator.into()), backend);
    }

    /// Finds the backend for a format, preferring a (format, generator)
    /// override.
    pub fn get(&self, format: &str, generator: &str) -> Result<&dyn Backend> {
        if let Some(b) = self
            .overrides
            .get(&(format.to_string(), generator.to_string()))
        {
            return Ok(b.as_ref());
        }
        self.backends
            .get(format)
            .map(Box::as_ref)
            .ok_or_else(|| Error::UnknownBackend {
                name: format.to_string(),
            })
    }

    /// Registered format names.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.backends.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fake(&'static str, &'static str);

    impl Backend for Fake {
        fn name(&self) -> &'static str {
            self.0
        }
        fn render(&self, _footprint: &Footprint, _warn: &mut WarnSink) -> Result<String> {
            Ok(self.1.to_string())
        }
    }

    #[test]
    fn builtin_formats_present() {
        let r = BackendRegistry::builtin();
        assert!(r.get("geda", "so").is_ok());
        assert!(r.get("kicad", "so").is_ok());
        assert!(r.get("eagle", "so").is_err());
    }

    #[test]
    fn override_takes_priority_for_its_generator() {
        let mut r = BackendRegistry::new();
        r.register(Box::new(Fake("geda", "stock")));
        r.register_override("geda", "so", Box::new(Fake("geda", "special")));
        assert_eq!(r.get("geda", "so").unwrap().name(), "geda");
        let fp_names: Vec<&str> = r.names().collect();
        assert_eq!(fp_names, vec!["geda"]);

        let mut sink = |_: &str| {};
        let fp = crate::model::Footprint::new(
            "x",
            "",
            crate::model::RefDes::new(
                crate::geom::Pt::origin(),
                crate::geom::Dim::mil(10.0),
                crate::geom::Dim::mil(40.0),
            )
            .unwrap(),
        );
        assert_eq!(r.get("geda", "so").unwrap().render(&fp, &mut sink).unwrap(), "special");
        assert_eq!(r.get("geda", "hole").unwrap().render(&fp, &mut sink).unwrap(), "stock");
    }
}
