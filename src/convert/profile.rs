//! Ordered converter registry.
//!
//! A profile is a plain list: the dispatcher walks it front to back and the
//! first converter that claims a pairing wins. Registering a converter
//! before the built-ins therefore overrides them for the pairings it claims.

use std::fmt;
use std::sync::Arc;

use crate::convert::trait_def::TypeConverter;
use crate::mapping::errors::MapError;

/// Ordered collection of converters consulted by the dispatcher.
#[derive(Clone, Default)]
pub struct MappingProfile {
    converters: Vec<Arc<dyn TypeConverter>>,
}

impl MappingProfile {
    /// Create an empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a converter.
    pub fn add_converter(&mut self, converter: impl TypeConverter + 'static) -> &mut Self {
        self.add_shared(Arc::new(converter))
    }

    /// Append a converter that is already shared.
    pub fn add_shared(&mut self, converter: Arc<dyn TypeConverter>) -> &mut Self {
        tracing::trace!("registering converter `{}`", converter.name());
        self.converters.push(converter);
        self
    }

    /// Append a converter handed over from dynamic code.
    ///
    /// Fails with [`MapError::InvalidArgument`] when `converter` is absent.
    pub fn try_add_converter(
        &mut self,
        converter: Option<Arc<dyn TypeConverter>>,
    ) -> Result<&mut Self, MapError> {
        let converter = converter.ok_or_else(|| MapError::missing("converter"))?;
        Ok(self.add_shared(converter))
    }

    /// Converters in registration order.
    pub fn converters(&self) -> &[Arc<dyn TypeConverter>] {
        &self.converters
    }

    /// Converter names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.converters.iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl fmt::Debug for MappingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingProfile")
            .field("converters", &self.names())
            .finish()
    }
}
