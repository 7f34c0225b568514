//! Property-based tests for circuit composition.

use proptest::prelude::*;
use qoracle_ir::{Circuit, QubitId};

/// Gate operations that can be applied to a circuit.
#[derive(Debug, Clone)]
enum GateOp {
    H(u32),
    X(u32),
    Z(u32),
    CX(u32, u32),
    Barrier,
}

impl GateOp {
    fn apply(self, circuit: &mut Circuit) {
        // Invalid operands (e.g. CX(q, q)) are rejected by the builder and skipped.
        let _ = match self {
            GateOp::H(q) => circuit.h(QubitId(q)),
            GateOp::X(q) => circuit.x(QubitId(q)),
            GateOp::Z(q) => circuit.z(QubitId(q)),
            GateOp::CX(c, t) => circuit.cx(QubitId(c), QubitId(t)),
            GateOp::Barrier => circuit.barrier_all(),
        };
    }
}

fn arb_gate_op(num_qubits: u32) -> impl Strategy<Value = GateOp> {
    prop_oneof![
        (0..num_qubits).prop_map(GateOp::H),
        (0..num_qubits).prop_map(GateOp::X),
        (0..num_qubits).prop_map(GateOp::Z),
        (0..num_qubits, 0..num_qubits).prop_map(|(c, t)| GateOp::CX(c, t)),
        Just(GateOp::Barrier),
    ]
}

fn arb_circuit(num_qubits: u32) -> impl Strategy<Value = Circuit> {
    prop::collection::vec(arb_gate_op(num_qubits), 0..=8).prop_map(move |ops| {
        let mut circuit = Circuit::new(num_qubits);
        for op in ops {
            op.apply(&mut circuit);
        }
        circuit
    })
}

fn arb_triple() -> impl Strategy<Value = (Circuit, Circuit, Circuit)> {
    (1_u32..=4).prop_flat_map(|n| (arb_circuit(n), arb_circuit(n), arb_circuit(n)))
}

proptest! {
    #[test]
    fn compose_is_associative((base, a, b) in arb_triple()) {
        let left = base.compose(&a).unwrap().compose(&b).unwrap();
        let right = base.compose(&a.compose(&b).unwrap()).unwrap();
        prop_assert_eq!(left.instructions(), right.instructions());
    }

    #[test]
    fn compose_length_is_additive((base, a, _b) in arb_triple()) {
        let composed = base.compose(&a).unwrap();
        prop_assert_eq!(
            composed.instructions().len(),
            base.instructions().len() + a.instructions().len()
        );
        prop_assert_eq!(composed.num_qubits(), base.num_qubits());
    }
}
