//! Register and compiler configuration consumed at lowering time.

use indexmap::IndexMap;
use miette::Diagnostic;
use thiserror::Error;

use crate::ir::{AttrValue, GridType, QubitPosition};

#[derive(Clone, Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum EnvironmentError {
    /// The register positions already fix the number of qubits.
    #[error("number of qubits already defined by the register")]
    QubitCountFixedByRegister,
}

/// Compilation environment: register geometry, QPU directives, and
/// compiler settings. Passed by reference into
/// [`compile_to_model`](crate::compiler::compile_to_model); the
/// expression engine itself never reads it.
#[derive(Clone, Debug, PartialEq)]
pub struct Environment {
    pub qubit_positions: Option<Vec<QubitPosition>>,
    pub grid_type: Option<GridType>,
    pub grid_scale: f64,
    pub num_qubits: usize,
    pub grid_options: IndexMap<String, AttrValue>,
    pub directives: IndexMap<String, AttrValue>,
    pub settings: IndexMap<String, AttrValue>,
}

impl Default for Environment {
    fn default() -> Self {
        Environment {
            qubit_positions: None,
            grid_type: None,
            grid_scale: 1.0,
            num_qubits: 0,
            grid_options: IndexMap::new(),
            directives: IndexMap::new(),
            settings: IndexMap::new(),
        }
    }
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    /// Fix the number of qubits. Fails when qubit positions already
    /// determine a different register size.
    pub fn set_number_qubits(&mut self, n: usize) -> Result<(), EnvironmentError> {
        if let Some(positions) = &self.qubit_positions {
            if positions.len() != n {
                return Err(EnvironmentError::QubitCountFixedByRegister);
            }
        }
        self.num_qubits = n;
        Ok(())
    }

    /// Set the qubit positions; this also fixes the qubit count.
    pub fn set_qubit_positions(&mut self, positions: Vec<QubitPosition>) {
        self.num_qubits = positions.len();
        self.qubit_positions = Some(positions);
    }

    pub fn add_grid_options(
        &mut self,
        options: impl IntoIterator<Item = (String, AttrValue)>,
    ) {
        self.grid_options.extend(options);
    }

    pub fn add_directives(
        &mut self,
        directives: impl IntoIterator<Item = (String, AttrValue)>,
    ) {
        self.directives.extend(directives);
    }

    pub fn add_settings(
        &mut self,
        settings: impl IntoIterator<Item = (String, AttrValue)>,
    ) {
        self.settings.extend(settings);
    }

    /// Restore the defaults.
    pub fn reset(&mut self) {
        *self = Environment::default();
    }
}
