//! Lowering of normalised expressions to the backend IR.
//!
//! A pure operator expression lowers to one quantum instruction per
//! Kronecker factor in application order; parametric operators first
//! lower their classical arguments as SSA-style assignments. A pure
//! classical expression lowers the same way on its own. Mixed shapes
//! (operator content inside classical structure beyond operator
//! parameters) are outside the lowering contract.

use indexmap::IndexMap;
use miette::Diagnostic;
use thiserror::Error;

use crate::environment::Environment;
use crate::expression::Expression;
use crate::ir::{
    Alloc, AllocQubits, Assign, Call, Instruction, Model, Operand, QuInstruct,
};
use crate::kron::JoinRule;

#[derive(Clone, Debug, Error, Diagnostic, PartialEq)]
pub enum CompileError {
    /// The expression addresses qubits outside the configured register.
    #[error("the expression requires {required} qubits but the register allocates {allocated}")]
    RegisterTooSmall { required: usize, allocated: usize },
    /// The expression shape is not covered by the lowering contract.
    #[error("expression `{0}` is not convertible to IR")]
    NotConvertible(String),
    /// A single-angle rotation was given more than one parameter.
    #[error("instruction '{name}' takes a single parameter but {found} were given")]
    TooManyParameters { name: String, found: usize },
}

/// Lower a normalised expression to a backend model, reading register
/// geometry and directives from the given environment.
pub fn compile_to_model(expr: &Expression, env: &Environment) -> Result<Model, CompileError> {
    Ok(Model {
        register: allocate_qubits(expr, env)?,
        inputs: extract_inputs(expr),
        instructions: extract_instructions(expr)?,
        directives: env.directives.clone(),
        settings: env.settings.clone(),
    })
}

fn allocate_qubits(expr: &Expression, env: &Environment) -> Result<AllocQubits, CompileError> {
    let required = expr.max_index().map_or(0, |i| i as usize + 1);
    let positions = env.qubit_positions.clone().unwrap_or_default();
    if !positions.is_empty() && required > positions.len() {
        return Err(CompileError::RegisterTooSmall {
            required,
            allocated: positions.len(),
        });
    }
    let num_qubits = required.max(positions.len()).max(env.num_qubits);
    Ok(AllocQubits {
        num_qubits,
        qubit_positions: positions,
        grid_type: env.grid_type,
        grid_scale: env.grid_scale,
        options: env.grid_options.clone(),
    })
}

fn extract_inputs(expr: &Expression) -> IndexMap<String, Alloc> {
    let mut inputs = IndexMap::new();
    collect_inputs(expr, &mut inputs);
    inputs
}

fn collect_inputs(expr: &Expression, inputs: &mut IndexMap<String, Alloc>) {
    match expr {
        Expression::Value(_) => {}
        Expression::Symbol(s) => {
            inputs.insert(s.name.clone(), Alloc::new(s.size, s.trainable));
        }
        Expression::Function(f) => {
            for arg in &f.args {
                collect_inputs(arg, inputs);
            }
        }
        // The wrapped symbol of a plain gate names the operator, not an
        // input.
        Expression::QuantumOperator(op) => match op.expr.as_ref() {
            Expression::Symbol(_) => {}
            inner => collect_inputs(inner, inputs),
        },
        Expression::Add(args) | Expression::Mul(args) | Expression::Kron(args) => {
            for arg in args {
                collect_inputs(arg, inputs);
            }
        }
        Expression::Pow(base, exponent) => {
            collect_inputs(base, inputs);
            collect_inputs(exponent, inputs);
        }
    }
}

fn extract_instructions(expr: &Expression) -> Result<Vec<Instruction>, CompileError> {
    let mut lowering = Lowering::default();
    if expr.is_quantum_operator() || expr.is_kronecker_product() {
        lowering.emit_quantum(expr)?;
    } else {
        lowering.lower_classical(expr)?;
    }
    Ok(lowering.instructions)
}

#[derive(Default)]
struct Lowering {
    instructions: Vec<Instruction>,
    // Identical sub-expressions are computed once and loaded afterwards.
    mem: IndexMap<Expression, Operand>,
    count: usize,
}

impl Lowering {
    fn emit_quantum(&mut self, expr: &Expression) -> Result<(), CompileError> {
        match expr {
            Expression::Kron(args) => {
                for arg in args {
                    self.emit_quantum(arg)?;
                }
                Ok(())
            }
            Expression::QuantumOperator(op) => match op.expr.as_ref() {
                Expression::Symbol(s) => {
                    let name = instruction_name(&op.properties.instruction_name, &s.name);
                    self.instructions.push(Instruction::Quantum(QuInstruct::new(
                        name,
                        op.support.clone(),
                        Vec::new(),
                    )));
                    Ok(())
                }
                Expression::Function(f) => {
                    let name = instruction_name(&op.properties.instruction_name, &f.name);
                    if op.properties.join == Some(JoinRule::AngleSum) && f.args.len() > 1 {
                        return Err(CompileError::TooManyParameters {
                            name,
                            found: f.args.len(),
                        });
                    }
                    let mut args = Vec::with_capacity(f.args.len());
                    for arg in &f.args {
                        args.push(self.lower_classical(arg)?);
                    }
                    self.instructions.push(Instruction::Quantum(QuInstruct::new(
                        name,
                        op.support.clone(),
                        args,
                    )));
                    Ok(())
                }
                _ => Err(CompileError::NotConvertible(expr.to_string())),
            },
            _ => Err(CompileError::NotConvertible(expr.to_string())),
        }
    }

    fn lower_classical(&mut self, expr: &Expression) -> Result<Operand, CompileError> {
        if let Some(operand) = self.mem.get(expr) {
            return Ok(operand.clone());
        }
        let operand = match expr {
            Expression::Value(v) => return Ok(Operand::Literal(*v)),
            Expression::Symbol(s) => return Ok(Operand::Load(s.name.clone())),
            Expression::Pow(base, exponent) => {
                let base = self.lower_classical(base)?;
                let exponent = self.lower_classical(exponent)?;
                self.assign(Call::new("pow", vec![base, exponent]))
            }
            Expression::Add(args) => self.lower_chain("add", args)?,
            Expression::Mul(args) => self.lower_chain("mul", args)?,
            Expression::Function(f) => {
                let mut args = Vec::with_capacity(f.args.len());
                for arg in &f.args {
                    args.push(self.lower_classical(arg)?);
                }
                self.assign(Call::new(&*f.name, args))
            }
            Expression::QuantumOperator(_) | Expression::Kron(_) => {
                return Err(CompileError::NotConvertible(expr.to_string()));
            }
        };
        self.mem.insert(expr.clone(), operand.clone());
        Ok(operand)
    }

    fn lower_chain(
        &mut self,
        op: &str,
        args: &[Expression],
    ) -> Result<Operand, CompileError> {
        let mut lhs = self.lower_classical(&args[0])?;
        for arg in &args[1..] {
            let rhs = self.lower_classical(arg)?;
            lhs = self.assign(Call::new(op, vec![lhs, rhs]));
        }
        Ok(lhs)
    }

    fn assign(&mut self, call: Call) -> Operand {
        let label = format!("%{}", self.count);
        self.count += 1;
        self.instructions
            .push(Instruction::Assign(Assign::new(label.clone(), call)));
        Operand::Load(label)
    }
}

fn instruction_name(overridden: &Option<String>, default: &str) -> String {
    overridden
        .clone()
        .unwrap_or_else(|| default.to_lowercase())
}
