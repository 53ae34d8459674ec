use serde::{Deserialize, Serialize};

/// Métricas sobre las que se definen umbrales de alerta por producto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Stock,
    Quality,
    Organization,
    Context,
}

/// Cortes buen/aviso/crítico de una métrica, siempre en [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSettings {
    pub good: f64,
    pub warning: f64,
    pub critical: f64,
}

impl ThresholdSettings {
    pub fn new(good: f64, warning: f64, critical: f64) -> Self {
        Self {
            good,
            warning,
            critical,
        }
        .clamped()
    }

    /// Los sliders del editor garantizan [0, 100] por construcción; al
    /// recibir valores por la API lo garantizamos aquí.
    pub fn clamped(self) -> Self {
        Self {
            good: self.good.clamp(0.0, 100.0),
            warning: self.warning.clamp(0.0, 100.0),
            critical: self.critical.clamp(0.0, 100.0),
        }
    }
}

/// Umbrales de las cuatro métricas de un producto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductThresholds {
    pub stock: ThresholdSettings,
    pub quality: ThresholdSettings,
    pub organization: ThresholdSettings,
    pub context: ThresholdSettings,
}

impl Default for ProductThresholds {
    // Valores iniciales del editor; no se cargan de ningún almacén.
    fn default() -> Self {
        Self {
            stock: ThresholdSettings::new(70.0, 40.0, 20.0),
            quality: ThresholdSettings::new(80.0, 60.0, 40.0),
            organization: ThresholdSettings::new(75.0, 50.0, 30.0),
            context: ThresholdSettings::new(75.0, 50.0, 30.0),
        }
    }
}

impl ProductThresholds {
    pub fn clamped(self) -> Self {
        Self {
            stock: self.stock.clamped(),
            quality: self.quality.clamped(),
            organization: self.organization.clamped(),
            context: self.context.clamped(),
        }
    }

    pub fn metric(&self, metric: Metric) -> ThresholdSettings {
        match metric {
            Metric::Stock => self.stock,
            Metric::Quality => self.quality,
            Metric::Organization => self.organization,
            Metric::Context => self.context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_editor() {
        let t = ProductThresholds::default();
        assert_eq!(t.stock.good, 70.0);
        assert_eq!(t.stock.warning, 40.0);
        assert_eq!(t.stock.critical, 20.0);
        assert_eq!(t.quality.good, 80.0);
        assert_eq!(t.metric(Metric::Organization).critical, 30.0);
        assert_eq!(t.metric(Metric::Context).warning, 50.0);
    }

    #[test]
    fn values_are_clamped_to_percentage_range() {
        let t = ThresholdSettings::new(140.0, -5.0, 50.0);
        assert_eq!(t.good, 100.0);
        assert_eq!(t.warning, 0.0);
        assert_eq!(t.critical, 50.0);
    }
}
