//! The intermediate-representation schema consumed by execution
//! backends.
//!
//! These records are the output contract of
//! [`compile_to_model`](crate::compiler::compile_to_model); nothing in
//! this module performs lowering itself.

use indexmap::IndexMap;

use crate::support::Support;
use crate::value::Value;

/// Register grid layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridType {
    Linear,
    Square,
    Triangular,
}

/// Physical position of a qubit in the register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QubitPosition {
    Linear(i64),
    Planar(i64, i64),
}

/// Free-form configuration values carried into the model.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Qubit register allocation.
#[derive(Clone, Debug, PartialEq)]
pub struct AllocQubits {
    pub num_qubits: usize,
    pub qubit_positions: Vec<QubitPosition>,
    pub grid_type: Option<GridType>,
    pub grid_scale: f64,
    pub options: IndexMap<String, AttrValue>,
}

/// Allocation record for one free input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Alloc {
    pub size: u32,
    pub trainable: bool,
}

impl Alloc {
    pub fn new(size: u32, trainable: bool) -> Self {
        Alloc { size, trainable }
    }
}

/// Argument of a classical call or quantum instruction.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// An immediate numeric literal.
    Literal(Value),
    /// Reads a named input or a previously assigned temporary.
    Load(String),
}

impl Operand {
    pub fn load(label: impl Into<String>) -> Self {
        Operand::Load(label.into())
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Operand::Literal(value.into())
    }
}

/// A classical function call.
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub identifier: String,
    pub args: Vec<Operand>,
}

impl Call {
    pub fn new(identifier: impl Into<String>, args: Vec<Operand>) -> Self {
        Call {
            identifier: identifier.into(),
            args,
        }
    }
}

/// Assignment of a call result to a temporary label. Labels are `"%0"`,
/// `"%1"`, … strictly increasing within one lowering and never reused.
#[derive(Clone, Debug, PartialEq)]
pub struct Assign {
    pub label: String,
    pub call: Call,
}

impl Assign {
    pub fn new(label: impl Into<String>, call: Call) -> Self {
        Assign {
            label: label.into(),
            call,
        }
    }
}

/// A quantum instruction applied to a support.
#[derive(Clone, Debug, PartialEq)]
pub struct QuInstruct {
    pub name: String,
    pub support: Support,
    pub args: Vec<Operand>,
}

impl QuInstruct {
    pub fn new(name: impl Into<String>, support: Support, args: Vec<Operand>) -> Self {
        QuInstruct {
            name: name.into(),
            support,
            args,
        }
    }
}

/// One element of the lowered instruction sequence.
#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    Assign(Assign),
    Quantum(QuInstruct),
}

/// The lowered model handed to an execution backend.
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    pub register: AllocQubits,
    pub inputs: IndexMap<String, Alloc>,
    pub instructions: Vec<Instruction>,
    pub directives: IndexMap<String, AttrValue>,
    pub settings: IndexMap<String, AttrValue>,
}
