use serde::{Deserialize, Serialize};

use crate::domain::{
    detection::Detection,
    status::{ClassificationPolicy, Status},
    user::{Role, User},
};

/// Las tres cámaras fijas del piloto, en el orden en que se combinan.
pub const SHELF_CAMERAS: [&str; 3] = ["6591", "6371", "6373"];

/// Mensaje único y genérico para cualquier fallo de carga.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch detections";

/// Estado de las tres estanterías fijas. Un campo ausente significa que el
/// backend no devolvió detecciones para esa cámara.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShelfsState {
    #[serde(rename = "s6591", skip_serializing_if = "Option::is_none")]
    pub s6591: Option<Vec<Detection>>,
    #[serde(rename = "s6371", skip_serializing_if = "Option::is_none")]
    pub s6371: Option<Vec<Detection>>,
    #[serde(rename = "s6373", skip_serializing_if = "Option::is_none")]
    pub s6373: Option<Vec<Detection>>,
}

impl ShelfsState {
    pub fn set(&mut self, camera_id: &str, detections: Option<Vec<Detection>>) {
        match camera_id {
            "6591" => self.s6591 = detections,
            "6371" => self.s6371 = detections,
            "6373" => self.s6373 = detections,
            other => tracing::warn!("Cámara desconocida ignorada: {other}"),
        }
    }

    /// Claves presentes, en el orden fijo de `SHELF_CAMERAS`.
    pub fn present_cameras(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.s6591.is_some() {
            out.push("6591");
        }
        if self.s6371.is_some() {
            out.push("6371");
        }
        if self.s6373.is_some() {
            out.push("6373");
        }
        out
    }

    /// Lista combinada, aplanada en el orden fijo de las estanterías.
    pub fn combined(&self) -> Vec<Detection> {
        [&self.s6591, &self.s6371, &self.s6373]
            .into_iter()
            .flatten()
            .flat_map(|list| list.iter().cloned())
            .collect()
    }
}

/// Filtro de la vista combinada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    All,
    Critical,
    Alert,
}

/// Estado único del dashboard: datos cargados, filtro, selección y perfil.
///
/// Es el dueño de todo el estado mutable; las vistas leen a través de los
/// métodos y mutan solo a través de los setters expuestos. Los mutadores
/// nunca tocan los datos descargados, solo el subconjunto visible.
#[derive(Debug)]
pub struct DashboardStore {
    shelfs: ShelfsState,
    detections: Vec<Detection>,
    current_filter: FilterKind,
    selected_slot: Option<Detection>,
    threshold_modal_product: Option<String>,
    current_user: User,
    loading: bool,
    error: Option<String>,
}

impl DashboardStore {
    /// Store recién creado: vacío y en estado de carga.
    pub fn new() -> Self {
        Self {
            shelfs: ShelfsState::default(),
            detections: Vec::new(),
            current_filter: FilterKind::All,
            selected_slot: None,
            threshold_modal_product: None,
            current_user: User::default(),
            loading: true,
            error: None,
        }
    }

    /// La carga terminó bien: fija las estanterías y aplana la combinada.
    pub fn apply_loaded(&mut self, shelfs: ShelfsState) {
        self.detections = shelfs.combined();
        self.shelfs = shelfs;
        self.loading = false;
        self.error = None;
    }

    /// La carga falló: una sola bandera genérica, sin distinguir qué
    /// estantería o por qué.
    pub fn apply_load_failed(&mut self) {
        self.loading = false;
        self.error = Some(FETCH_ERROR_MESSAGE.to_string());
    }

    pub fn shelfs(&self) -> &ShelfsState {
        &self.shelfs
    }

    pub fn detections(&self) -> &[Detection] {
        &self.detections
    }

    pub fn current_filter(&self) -> FilterKind {
        self.current_filter
    }

    /// Cambio de filtro: inmediato, síncrono y sin restricciones de
    /// transición.
    pub fn set_filter(&mut self, filter: FilterKind) {
        self.current_filter = filter;
    }

    /// Vista filtrada de la lista combinada, en su orden original.
    /// `critical`/`alert` se evalúan con la política `GlobalScore`.
    pub fn filtered_detections(&self) -> Vec<Detection> {
        let wanted = match self.current_filter {
            FilterKind::All => return self.detections.clone(),
            FilterKind::Critical => Status::Critical,
            FilterKind::Alert => Status::Alert,
        };
        self.detections
            .iter()
            .filter(|d| ClassificationPolicy::GlobalScore.classify(d) == wanted)
            .cloned()
            .collect()
    }

    pub fn selected_slot(&self) -> Option<&Detection> {
        self.selected_slot.as_ref()
    }

    pub fn set_selected_slot(&mut self, slot: Option<Detection>) {
        self.selected_slot = slot;
    }

    pub fn threshold_modal_product(&self) -> Option<&str> {
        self.threshold_modal_product.as_deref()
    }

    pub fn open_threshold_modal(&mut self, product_name: String) {
        self.threshold_modal_product = Some(product_name);
    }

    pub fn close_threshold_modal(&mut self) {
        self.threshold_modal_product = None;
    }

    pub fn current_user(&self) -> &User {
        &self.current_user
    }

    pub fn switch_user(&mut self, role: Role) {
        self.current_user = User::profile(role);
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::detection::RoiQuad;

    fn detection(id: &str, camera: &str, score: f64) -> Detection {
        Detection {
            id: id.into(),
            camera_id: camera.into(),
            image_name: String::new(),
            roi_id: format!("roi-{id}"),
            product_id: format!("p-{id}"),
            product_name: "Laranja".into(),
            fruit_type: String::new(),
            quantidade_pct: 60.0,
            qualidade_pct: 70.0,
            organizacao_pct: None,
            contexto_pct: 65.0,
            insights: String::new(),
            confidence: 0.8,
            roi_quad_px: RoiQuad::default(),
            score,
            indice_var: 0.0,
        }
    }

    fn loaded_store() -> DashboardStore {
        let mut shelfs = ShelfsState::default();
        shelfs.set(
            "6591",
            Some(vec![detection("a", "6591", 40.0), detection("b", "6591", 60.0)]),
        );
        shelfs.set("6373", Some(vec![detection("c", "6373", 90.0)]));
        let mut store = DashboardStore::new();
        store.apply_loaded(shelfs);
        store
    }

    #[test]
    fn combined_length_is_sum_of_shelves() {
        let store = loaded_store();
        assert_eq!(store.detections().len(), 3);
        assert_eq!(store.shelfs().present_cameras(), vec!["6591", "6373"]);
        assert!(!store.loading());
        assert!(store.error().is_none());
    }

    #[test]
    fn all_filter_keeps_original_order() {
        let store = loaded_store();
        let ids: Vec<String> = store
            .filtered_detections()
            .iter()
            .map(|d| d.id.clone())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn critical_and_alert_use_global_score_policy() {
        let mut store = loaded_store();
        store.set_filter(FilterKind::Critical);
        let ids: Vec<String> = store
            .filtered_detections()
            .iter()
            .map(|d| d.id.clone())
            .collect();
        assert_eq!(ids, vec!["a"]); // 40 < 50

        store.set_filter(FilterKind::Alert);
        let ids: Vec<String> = store
            .filtered_detections()
            .iter()
            .map(|d| d.id.clone())
            .collect();
        assert_eq!(ids, vec!["b"]); // 50 <= 60 < 75
    }

    #[test]
    fn refiltering_is_idempotent() {
        let mut store = loaded_store();
        store.set_filter(FilterKind::Alert);
        let once = store.filtered_detections();
        let again: Vec<Detection> = once
            .iter()
            .filter(|d| {
                ClassificationPolicy::GlobalScore.classify(d) == Status::Alert
            })
            .cloned()
            .collect();
        assert_eq!(once.len(), again.len());
    }

    #[test]
    fn load_failure_sets_generic_error() {
        let mut store = DashboardStore::new();
        assert!(store.loading());
        store.apply_load_failed();
        assert!(!store.loading());
        assert_eq!(store.error(), Some(FETCH_ERROR_MESSAGE));
        assert!(store.detections().is_empty());
    }

    #[test]
    fn mutators_do_not_touch_fetched_data() {
        let mut store = loaded_store();
        store.set_filter(FilterKind::Critical);
        store.set_selected_slot(Some(detection("x", "6591", 10.0)));
        store.open_threshold_modal("Laranja".into());
        store.switch_user(Role::Administrator);
        assert_eq!(store.detections().len(), 3);
        store.close_threshold_modal();
        assert!(store.threshold_modal_product().is_none());
    }
}
