use crate::asm::registers::{Register, RegisterPool, SCRATCH};

#[test]
fn requests_hand_out_the_scratch_registers_in_order() {
    let mut pool = RegisterPool::new();
    for expected in SCRATCH {
        assert_eq!(pool.request().unwrap(), expected);
    }
    assert_eq!(pool.busy_count(), SCRATCH.len());
}

#[test]
fn the_ninth_request_is_a_user_error() {
    let mut pool = RegisterPool::new();
    for _ in 0..SCRATCH.len() {
        pool.request().unwrap();
    }
    let err = pool.request().unwrap_err();
    assert!(err.to_string().contains("Expression is too complex."));
}

#[test]
fn release_then_request_returns_the_same_register() {
    let mut pool = RegisterPool::new();
    let register = pool.request().unwrap();
    assert_eq!(register, Register::S0);
    pool.release(register);
    assert_eq!(pool.request().unwrap(), Register::S0);
    assert_eq!(pool.busy_count(), 1);
}

#[test]
#[should_panic]
fn double_release_panics() {
    let mut pool = RegisterPool::new();
    let register = pool.request().unwrap();
    pool.release(register);
    pool.release(register);
}

#[test]
#[should_panic]
fn releasing_a_built_in_register_panics() {
    let mut pool = RegisterPool::new();
    pool.release(Register::Fp);
}
