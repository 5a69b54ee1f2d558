// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use chrono::NaiveDate;

use crate::models::{CarWashRecord, MonthRow, VehicleKind, WasherRow};
use crate::state::reactivity::Subscribers;
use crate::state::AuthState;
use crate::utils::today;

/// Vista activa dentro del dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Grid de tipos de vehículo
    Entry,
    /// Formulario de lavado para un tipo de vehículo
    Booking(VehicleKind),
    /// Formulario de lavado de alfombras (precio variable)
    Rug,
    /// Pagos diarios por washer
    Washers,
    /// Resumen mensual de empresa, todas las sucursales
    Company,
    /// Historial de transacciones
    History,
}

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub route: Rc<RefCell<Route>>,

    // Formulario de login (sobrevive a los re-renders de loading/error
    // para no perder lo que el usuario tipeó)
    pub login_email: Rc<RefCell<String>>,
    pub login_password: Rc<RefCell<String>>,

    // Booking (transiente, por formulario activo)
    pub booking_processing: Rc<RefCell<bool>>,

    // Vista de pagos diarios
    pub washer_rows: Rc<RefCell<Vec<WasherRow>>>,
    pub washers_loading: Rc<RefCell<bool>>,
    pub washers_error: Rc<RefCell<Option<String>>>,
    pub washers_date: Rc<RefCell<Option<NaiveDate>>>,
    pub expanded_washers: Rc<RefCell<HashSet<String>>>,

    // Vista de empresa (mes completo)
    pub month_rows: Rc<RefCell<Vec<MonthRow>>>,
    pub company_loading: Rc<RefCell<bool>>,
    /// (año, mes) seleccionado en el filtro
    pub selected_month: Rc<RefCell<(i32, u32)>>,
    pub company_search: Rc<RefCell<String>>,
    pub expanded_dates: Rc<RefCell<HashSet<String>>>,
    /// Claves "fecha-sucursal"
    pub expanded_branches: Rc<RefCell<HashSet<String>>>,

    // Historial
    pub records: Rc<RefCell<Vec<CarWashRecord>>>,
    pub records_loading: Rc<RefCell<bool>>,
    pub records_error: Rc<RefCell<Option<String>>>,

    changes: Subscribers,
}

impl AppState {
    pub fn new() -> Self {
        let now = today();
        use chrono::Datelike;
        Self {
            auth: AuthState::new(),
            route: Rc::new(RefCell::new(Route::Entry)),
            login_email: Rc::new(RefCell::new(String::new())),
            login_password: Rc::new(RefCell::new(String::new())),
            booking_processing: Rc::new(RefCell::new(false)),
            washer_rows: Rc::new(RefCell::new(Vec::new())),
            washers_loading: Rc::new(RefCell::new(false)),
            washers_error: Rc::new(RefCell::new(None)),
            washers_date: Rc::new(RefCell::new(None)),
            expanded_washers: Rc::new(RefCell::new(HashSet::new())),
            month_rows: Rc::new(RefCell::new(Vec::new())),
            company_loading: Rc::new(RefCell::new(false)),
            selected_month: Rc::new(RefCell::new((now.year(), now.month()))),
            company_search: Rc::new(RefCell::new(String::new())),
            expanded_dates: Rc::new(RefCell::new(HashSet::new())),
            expanded_branches: Rc::new(RefCell::new(HashSet::new())),
            records: Rc::new(RefCell::new(Vec::new())),
            records_loading: Rc::new(RefCell::new(false)),
            records_error: Rc::new(RefCell::new(None)),
            changes: Subscribers::new(),
        }
    }

    /// Suscribirse a cambios de estado (re-render batcheado en App)
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.changes.subscribe(callback);
    }

    /// Notificar un cambio de estado
    pub fn notify_change(&self) {
        self.changes.notify();
    }

    /// Navegar a otra vista (resetea expansiones de la vista anterior)
    pub fn navigate(&self, route: Route) {
        *self.route.borrow_mut() = route;
        self.expanded_washers.borrow_mut().clear();
        self.expanded_dates.borrow_mut().clear();
        self.expanded_branches.borrow_mut().clear();
        self.notify_change();
    }

    pub fn current_route(&self) -> Route {
        *self.route.borrow()
    }

    pub fn toggle_washer_row(&self, id: &str) {
        toggle_key(&mut self.expanded_washers.borrow_mut(), id);
        self.notify_change();
    }

    pub fn toggle_date_row(&self, id: &str) {
        toggle_key(&mut self.expanded_dates.borrow_mut(), id);
        self.notify_change();
    }

    pub fn toggle_branch_row(&self, date_id: &str, branch_id: &str) {
        let key = format!("{}-{}", date_id, branch_id);
        toggle_key(&mut self.expanded_branches.borrow_mut(), &key);
        self.notify_change();
    }

    pub fn is_branch_expanded(&self, date_id: &str, branch_id: &str) -> bool {
        self.expanded_branches
            .borrow()
            .contains(&format!("{}-{}", date_id, branch_id))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn toggle_key(set: &mut HashSet<String>, key: &str) {
    if !set.remove(key) {
        set.insert(key.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_form_values_are_shared_across_clones() {
        // El re-render clona el AppState; lo tipeado en el formulario debe
        // apuntar al mismo storage para sobrevivir al render siguiente
        let state = AppState::new();
        let render_copy = state.clone();
        *state.login_email.borrow_mut() = "a@b.com".to_string();
        *state.login_password.borrow_mut() = "secret1".to_string();
        assert_eq!(*render_copy.login_email.borrow(), "a@b.com");
        assert_eq!(*render_copy.login_password.borrow(), "secret1");
    }

    #[test]
    fn row_toggles_flip_membership() {
        let state = AppState::new();
        state.toggle_washer_row("w1");
        assert!(state.expanded_washers.borrow().contains("w1"));
        state.toggle_washer_row("w1");
        assert!(!state.expanded_washers.borrow().contains("w1"));

        state.toggle_branch_row("2024-11-02", "b1");
        assert!(state.is_branch_expanded("2024-11-02", "b1"));
        state.toggle_branch_row("2024-11-02", "b1");
        assert!(!state.is_branch_expanded("2024-11-02", "b1"));
    }
}
