//! Property tests for the statevector engine.

use proptest::prelude::*;
use qoracle_ir::{Instruction, QubitId, StandardGate};
use qoracle_sim::Statevector;

/// Unitary instructions over `num_qubits` qubits with valid operands.
fn arb_unitary(num_qubits: u32) -> impl Strategy<Value = Instruction> {
    let single = (0..num_qubits, 0..3u8).prop_map(|(q, g)| {
        let gate = match g {
            0 => StandardGate::H,
            1 => StandardGate::X,
            _ => StandardGate::Z,
        };
        Instruction::single_qubit_gate(gate, QubitId(q))
    });
    let phase = (-10.0f64..10.0).prop_map(Instruction::global_phase);
    let controlled = Just((0..num_qubits).collect::<Vec<_>>())
        .prop_shuffle()
        .prop_flat_map(move |order| {
            (1..=order.len()).prop_map(move |k| {
                let (target, controls) = order[..k].split_last().unwrap();
                if controls.len() == 1 {
                    Instruction::cx(QubitId(controls[0]), QubitId(*target))
                } else {
                    Instruction::mcx(controls.iter().copied().map(QubitId), QubitId(*target))
                }
            })
        });
    prop_oneof![3 => single, 1 => phase, 2 => controlled]
}

fn arb_program() -> impl Strategy<Value = (u32, Vec<Instruction>)> {
    (1u32..=6).prop_flat_map(|n| (Just(n), prop::collection::vec(arb_unitary(n), 0..40)))
}

proptest! {
    #[test]
    fn unitaries_preserve_norm((n, program) in arb_program()) {
        let mut sv = Statevector::new(n as usize);
        for inst in &program {
            sv.apply(inst).unwrap();
        }
        prop_assert!((sv.norm_sqr() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn hadamard_is_an_involution((n, program) in arb_program(), q in 0u32..6) {
        let q = q % n;
        let mut sv = Statevector::new(n as usize);
        for inst in &program {
            sv.apply(inst).unwrap();
        }
        let before = sv.clone();
        let h = Instruction::single_qubit_gate(StandardGate::H, QubitId(q));
        sv.apply(&h).unwrap();
        sv.apply(&h).unwrap();
        for (a, b) in sv.amplitudes().iter().zip(before.amplitudes()) {
            prop_assert!((a - b).norm() < 1e-9);
        }
    }

    #[test]
    fn reset_leaves_qubit_in_zero((n, program) in arb_program(), q in 0u32..6) {
        let q = q % n;
        let mut sv = Statevector::new(n as usize);
        for inst in &program {
            sv.apply(inst).unwrap();
        }
        sv.apply(&Instruction::reset(QubitId(q))).unwrap();
        prop_assert!((sv.norm_sqr() - 1.0).abs() < 1e-9);
        let weight_one: f64 = sv
            .probabilities()
            .iter()
            .enumerate()
            .filter(|(i, _)| (i >> q) & 1 == 1)
            .map(|(_, p)| p)
            .sum();
        prop_assert!(weight_one < 1e-12);
    }
}
