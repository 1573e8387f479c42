//! Caller-owned name → design map.

use std::collections::BTreeMap;

use super::{
    CentroidDesign, CentroidGrowthDesign, DesignConfig, DesignError, DesignGenerator,
    LatticeDesign, MixturePoint,
};

/// Designs selectable by name. `Default` holds the structured designs; hull
/// designs are inserted and removed as the caller's regions come and go.
pub struct DesignRegistry {
    designs: BTreeMap<String, Box<dyn DesignGenerator>>,
}

impl Default for DesignRegistry {
    fn default() -> Self {
        let mut reg = Self::empty();
        reg.insert(Box::new(CentroidDesign));
        reg.insert(Box::new(CentroidGrowthDesign));
        reg.insert(Box::new(LatticeDesign));
        reg
    }
}

impl DesignRegistry {
    pub fn empty() -> Self {
        Self {
            designs: BTreeMap::new(),
        }
    }

    /// Register under the generator's own name; returns the replaced design.
    pub fn insert(&mut self, design: Box<dyn DesignGenerator>) -> Option<Box<dyn DesignGenerator>> {
        self.designs.insert(design.name().to_string(), design)
    }

    pub fn remove(&mut self, name: &str) -> Option<Box<dyn DesignGenerator>> {
        self.designs.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&dyn DesignGenerator> {
        self.designs.get(name).map(|d| d.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.designs.keys().map(String::as_str).collect()
    }

    pub fn generate(&self, name: &str, cfg: &DesignConfig) -> Result<Vec<MixturePoint>, DesignError> {
        let design = self.get(name).ok_or_else(|| DesignError::UnknownDesign {
            name: name.to_string(),
        })?;
        let points = design.generate(cfg)?;
        tracing::debug!(
            design = name,
            k = cfg.components,
            order = cfg.order,
            points = points.len(),
            "design generated"
        );
        Ok(points)
    }
}
