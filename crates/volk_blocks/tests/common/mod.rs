//! Harnesses which feed stretched test vectors through one block and compare what comes out.
#![allow(dead_code)]
use num::complex::{Complex32, Complex64};
use num::Complex;

use volk_blocks::framework::{BlockId, CollectorHandle, CollectorSink, FeederSource, PortName, Topology};
use volk_blocks::{registry, BlockArg, BoxedBlock, DType, Element};

/// Test vectors are repeated this many times, so that blocks see more than one kernel call's worth of data.
pub const NUM_REPETITIONS: usize = 123;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Tolerance {
    Strict,
    /// For approximations, such as the fast exponential.
    Lax,
}

impl Tolerance {
    fn epsilon(self) -> f64 {
        match self {
            Tolerance::Strict => 1e-3,
            Tolerance::Lax => 0.5,
        }
    }
}

/// Element types the harnesses know how to compare.
pub trait Close: Element {
    fn close(&self, other: &Self, tolerance: Tolerance) -> bool;
}

macro_rules! exact {
    ($($t: ty),*) => {
        $(
            impl Close for $t {
                fn close(&self, other: &Self, _: Tolerance) -> bool {
                    self == other
                }
            }
        )*
    };
}

exact!(i8, i16, i32, i64, u8, u16, u32, u64, Complex<i8>, Complex<i16>);

fn close_f64(a: f64, b: f64, tolerance: Tolerance) -> bool {
    // Relative for large magnitudes, absolute near zero.
    (a - b).abs() <= tolerance.epsilon() * a.abs().max(b.abs()).max(1.0)
}

impl Close for f32 {
    fn close(&self, other: &Self, tolerance: Tolerance) -> bool {
        close_f64(*self as f64, *other as f64, tolerance)
    }
}

impl Close for f64 {
    fn close(&self, other: &Self, tolerance: Tolerance) -> bool {
        close_f64(*self, *other, tolerance)
    }
}

impl Close for Complex32 {
    fn close(&self, other: &Self, tolerance: Tolerance) -> bool {
        self.re.close(&other.re, tolerance) && self.im.close(&other.im, tolerance)
    }
}

impl Close for Complex64 {
    fn close(&self, other: &Self, tolerance: Tolerance) -> bool {
        self.re.close(&other.re, tolerance) && self.im.close(&other.im, tolerance)
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn dtype<T: Element>() -> BlockArg {
    DType::of::<T>().into()
}

/// Build a block from the global registry, panicking on failure.
pub fn make(path: &str, args: &[BlockArg]) -> BoxedBlock {
    init_logging();
    match registry().make(path, args) {
        Ok(b) => b,
        Err(e) => panic!("Could not make {}: {}", path, e),
    }
}

pub fn stretch<T: Copy>(values: &[T]) -> Vec<T> {
    values.repeat(NUM_REPETITIONS)
}

pub fn assert_all_close<T: Close>(expected: &[T], got: &[T], tolerance: Tolerance) {
    assert_eq!(expected.len(), got.len(), "Wrong number of elements");
    for (i, (e, g)) in expected.iter().zip(got.iter()).enumerate() {
        assert!(e.close(g, tolerance), "Element {}: expected {:?}, got {:?}", i, e, g);
    }
}

pub fn indexed() -> [PortName; 2] {
    [PortName::Index(0), PortName::Index(1)]
}

pub fn named(a: &'static str, b: &'static str) -> [PortName; 2] {
    [a.into(), b.into()]
}

/// A topology which has run to completion, and the block under test within it.
pub struct Harness {
    pub topology: Topology,
    pub block: BlockId,
}

fn add_source<T: Element>(topology: &mut Topology, values: &[T]) -> BlockId {
    topology
        .add(Box::new(FeederSource::new(&stretch(values)).with_elements_per_work(1000)))
        .unwrap()
}

fn add_sink<T: Element>(topology: &mut Topology) -> (BlockId, CollectorHandle) {
    let (sink, handle) = CollectorSink::new(DType::of::<T>());
    (topology.add(Box::new(sink)).unwrap(), handle)
}

/// Run `inputs`, stretched, through a one-input one-output block and return everything it produced.
pub fn run_one_to_one<I: Element, O: Element>(block: BoxedBlock, inputs: &[I]) -> (Harness, Vec<O>) {
    let mut topology = Topology::default();
    let src = add_source(&mut topology, inputs);
    let id = topology.add(block).unwrap();
    let (dst, handle) = add_sink::<O>(&mut topology);
    topology.connect(src, 0usize, id, 0usize).unwrap();
    topology.connect(id, 0usize, dst, 0usize).unwrap();
    topology.run();

    (Harness { topology, block: id }, handle.elements::<O>())
}

pub fn test_one_to_one<I: Element, O: Close>(
    block: BoxedBlock,
    inputs: &[I],
    expected: &[O],
    tolerance: Tolerance,
) -> Harness {
    assert_eq!(inputs.len(), expected.len());
    let (harness, got) = run_one_to_one::<I, O>(block, inputs);
    assert_all_close(&stretch(expected), &got, tolerance);
    harness
}

pub fn test_one_to_two<I: Element, O: Close>(
    block: BoxedBlock,
    inputs: &[I],
    expected0: &[O],
    expected1: &[O],
    ports: [PortName; 2],
) -> Harness {
    let mut topology = Topology::default();
    let src = add_source(&mut topology, inputs);
    let id = topology.add(block).unwrap();
    let (dst0, handle0) = add_sink::<O>(&mut topology);
    let (dst1, handle1) = add_sink::<O>(&mut topology);
    let [port0, port1] = ports;
    topology.connect(src, 0usize, id, 0usize).unwrap();
    topology.connect(id, port0, dst0, 0usize).unwrap();
    topology.connect(id, port1, dst1, 0usize).unwrap();
    topology.run();

    assert_all_close(&stretch(expected0), &handle0.elements::<O>(), Tolerance::Strict);
    assert_all_close(&stretch(expected1), &handle1.elements::<O>(), Tolerance::Strict);
    Harness { topology, block: id }
}

pub fn test_two_to_one<I0: Element, I1: Element, O: Close>(
    block: BoxedBlock,
    inputs0: &[I0],
    inputs1: &[I1],
    expected: &[O],
    ports: [PortName; 2],
    tolerance: Tolerance,
) -> Harness {
    let mut topology = Topology::default();
    let src0 = add_source(&mut topology, inputs0);
    let src1 = add_source(&mut topology, inputs1);
    let id = topology.add(block).unwrap();
    let (dst, handle) = add_sink::<O>(&mut topology);
    let [port0, port1] = ports;
    topology.connect(src0, 0usize, id, port0).unwrap();
    topology.connect(src1, 0usize, id, port1).unwrap();
    topology.connect(id, 0usize, dst, 0usize).unwrap();
    topology.run();

    assert_all_close(&stretch(expected), &handle.elements::<O>(), tolerance);
    Harness { topology, block: id }
}

/// Indexed inputs `0..inputs.len()` and outputs `0..expected.len()`, all of one type each.
pub fn test_m_to_n<I: Element, O: Close>(block: BoxedBlock, inputs: &[&[I]], expected: &[&[O]]) -> Harness {
    let mut topology = Topology::default();
    let id = topology.add(block).unwrap();
    for (port, values) in inputs.iter().copied().enumerate() {
        let src = add_source(&mut topology, values);
        topology.connect(src, 0usize, id, port).unwrap();
    }

    let mut handles = vec![];
    for port in 0..expected.len() {
        let (dst, handle) = add_sink::<O>(&mut topology);
        topology.connect(id, port, dst, 0usize).unwrap();
        handles.push(handle);
    }
    topology.run();

    for (port, (values, handle)) in expected.iter().copied().zip(handles.iter()).enumerate() {
        let got = handle.elements::<O>();
        assert_eq!(got.len(), values.len() * NUM_REPETITIONS, "Output {}", port);
        assert_all_close(&stretch(values), &got, Tolerance::Strict);
    }
    Harness { topology, block: id }
}
