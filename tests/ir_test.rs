use indexmap::IndexMap;
use qexpr_rs::constructors::{array_parameter, parameter, parametric_operator, variable};
use qexpr_rs::environment::EnvironmentError;
use qexpr_rs::functions::{exp, sin};
use qexpr_rs::ir::{
    Alloc, AllocQubits, Assign, AttrValue, Call, GridType, Instruction, Model, Operand,
    QuInstruct, QubitPosition,
};
use qexpr_rs::kron::JoinRule;
use qexpr_rs::operators::{free_evolution, native_drive, rx, ry, x};
use qexpr_rs::{CompileError, Environment, Support, compile_to_model};

#[test]
fn rotation_lowering_end_to_end() {
    let theta = parameter("theta").unwrap();
    let expr = rx(theta / 2, 0);
    let model = compile_to_model(&expr, &Environment::new()).unwrap();

    let goal = Model {
        register: AllocQubits {
            num_qubits: 1,
            qubit_positions: Vec::new(),
            grid_type: None,
            grid_scale: 1.0,
            options: IndexMap::new(),
        },
        inputs: IndexMap::from([("theta".to_owned(), Alloc::new(1, false))]),
        instructions: vec![
            Instruction::Assign(Assign::new(
                "%0",
                Call::new("mul", vec![Operand::literal(0.5), Operand::load("theta")]),
            )),
            Instruction::Quantum(QuInstruct::new(
                "rx",
                Support::from(0),
                vec![Operand::load("%0")],
            )),
        ],
        directives: IndexMap::new(),
        settings: IndexMap::new(),
    };

    assert_eq!(model, goal);
}

#[test]
fn plain_gates_lower_to_lowercase_instructions() {
    let expr = x(0) * x(1);
    let model = compile_to_model(&expr, &Environment::new()).unwrap();
    assert_eq!(model.register.num_qubits, 2);
    assert_eq!(
        model.instructions,
        vec![
            Instruction::Quantum(QuInstruct::new("x", Support::from(0), Vec::new())),
            Instruction::Quantum(QuInstruct::new("x", Support::from(1), Vec::new())),
        ]
    );
}

#[test]
fn repeated_parameters_are_memoized() {
    let theta = parameter("theta").unwrap();
    let angle = theta * 2i32;
    let expr = rx(angle.clone(), 0) * ry(angle, 1);
    let model = compile_to_model(&expr, &Environment::new()).unwrap();

    assert_eq!(model.instructions.len(), 3);
    let Instruction::Assign(assign) = &model.instructions[0] else {
        panic!("expected the shared angle to be assigned first");
    };
    assert_eq!(assign.label, "%0");
    for instruction in &model.instructions[1..] {
        let Instruction::Quantum(quantum) = instruction else {
            panic!("expected quantum instructions after the assignment");
        };
        assert_eq!(quantum.args, vec![Operand::load("%0")]);
    }
}

#[test]
fn classical_expressions_lower_on_their_own() {
    let a = parameter("a").unwrap();
    let b = parameter("b").unwrap();
    let c = parameter("c").unwrap();
    let expr = a * b + c;
    let model = compile_to_model(&expr, &Environment::new()).unwrap();

    assert_eq!(model.register.num_qubits, 0);
    assert_eq!(
        model.instructions,
        vec![
            Instruction::Assign(Assign::new(
                "%0",
                Call::new("mul", vec![Operand::load("a"), Operand::load("b")]),
            )),
            Instruction::Assign(Assign::new(
                "%1",
                Call::new("add", vec![Operand::load("%0"), Operand::load("c")]),
            )),
        ]
    );
    assert_eq!(model.inputs.len(), 3);
}

#[test]
fn powers_lower_their_base_and_exponent() {
    let a = parameter("a").unwrap();
    let b = parameter("b").unwrap();
    let model = compile_to_model(&a.pow(b), &Environment::new()).unwrap();
    assert_eq!(
        model.instructions,
        vec![Instruction::Assign(Assign::new(
            "%0",
            Call::new("pow", vec![Operand::load("a"), Operand::load("b")]),
        ))]
    );
    // Symbols under the power are inputs too.
    assert_eq!(model.inputs.get("a"), Some(&Alloc::new(1, false)));
    assert_eq!(model.inputs.get("b"), Some(&Alloc::new(1, false)));
}

#[test]
fn inputs_carry_size_and_trainability() {
    let weights = array_parameter("w", 3).unwrap();
    let phi = variable("phi").unwrap();
    let expr = rx(sin(weights) * phi, 0);
    let model = compile_to_model(&expr, &Environment::new()).unwrap();

    assert_eq!(model.inputs.get("w"), Some(&Alloc::new(3, false)));
    assert_eq!(model.inputs.get("phi"), Some(&Alloc::new(1, true)));
}

#[test]
fn analog_operations_use_their_instruction_names() {
    let t = parameter("t").unwrap();
    let omega = parameter("omega").unwrap();
    let delta = parameter("delta").unwrap();
    let phi = parameter("phi").unwrap();

    let expr = native_drive(t.clone(), omega, delta, phi, Support::all())
        * free_evolution(t, Support::all());
    let model = compile_to_model(&expr, &Environment::new()).unwrap();

    let names: Vec<&str> = model
        .instructions
        .iter()
        .filter_map(|instruction| match instruction {
            Instruction::Quantum(quantum) => Some(quantum.name.as_str()),
            Instruction::Assign(_) => None,
        })
        .collect();
    assert_eq!(names, vec!["dyn_pulse", "dyn_wait"]);
}

#[test]
fn register_geometry_comes_from_the_environment() {
    let mut env = Environment::new();
    env.set_qubit_positions(vec![
        QubitPosition::Planar(0, 0),
        QubitPosition::Planar(0, 1),
        QubitPosition::Planar(1, 0),
    ]);
    env.grid_type = Some(GridType::Square);
    env.grid_scale = 1.5;
    env.add_directives([("rydberg".to_owned(), AttrValue::Bool(true))]);

    let model = compile_to_model(&x(0), &env).unwrap();
    assert_eq!(model.register.num_qubits, 3);
    assert_eq!(model.register.grid_type, Some(GridType::Square));
    assert_eq!(model.register.grid_scale, 1.5);
    assert_eq!(
        model.directives.get("rydberg"),
        Some(&AttrValue::Bool(true))
    );
}

#[test]
fn configured_register_size_wins_over_the_expression() {
    let mut env = Environment::new();
    env.set_number_qubits(5).unwrap();
    let model = compile_to_model(&x(0), &env).unwrap();
    assert_eq!(model.register.num_qubits, 5);
}

#[test]
fn expressions_beyond_the_register_are_rejected() {
    let mut env = Environment::new();
    env.set_qubit_positions(vec![QubitPosition::Linear(0)]);
    assert_eq!(
        compile_to_model(&x(2), &env),
        Err(CompileError::RegisterTooSmall {
            required: 3,
            allocated: 1,
        })
    );
}

#[test]
fn qubit_count_is_locked_by_positions() {
    let mut env = Environment::new();
    env.set_qubit_positions(vec![QubitPosition::Linear(0), QubitPosition::Linear(1)]);
    assert_eq!(
        env.set_number_qubits(3),
        Err(EnvironmentError::QubitCountFixedByRegister)
    );
    assert!(env.set_number_qubits(2).is_ok());

    env.reset();
    assert_eq!(env, Environment::default());
    assert!(env.set_number_qubits(3).is_ok());
}

#[test]
fn mixed_expressions_are_not_convertible() {
    let a = parameter("a").unwrap();
    let mixed = x(0) + a;
    assert!(matches!(
        compile_to_model(&mixed, &Environment::new()),
        Err(CompileError::NotConvertible(_))
    ));

    let evolution = exp(x(0));
    assert!(matches!(
        compile_to_model(&evolution, &Environment::new()),
        Err(CompileError::NotConvertible(_))
    ));
}

#[test]
fn single_angle_rotations_reject_extra_parameters() {
    let a = parameter("a").unwrap();
    let b = parameter("b").unwrap();
    let malformed = parametric_operator("RX", vec![a, b], Some(JoinRule::AngleSum), 0);
    assert_eq!(
        compile_to_model(&malformed, &Environment::new()),
        Err(CompileError::TooManyParameters {
            name: "rx".to_owned(),
            found: 2,
        })
    );
}
