use rand::Rng;

/// One multiplication problem. Immutable once created; `answer` is
/// precomputed so the checker never re-derives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Problem {
    pub multiplier: u32,
    pub operand: u32,
    pub answer: u64,
}

impl Problem {
    pub fn new(multiplier: u32, operand: u32) -> Self {
        // Widened so no u32 multiplier can overflow the product
        Self {
            multiplier,
            operand,
            answer: u64::from(multiplier) * u64::from(operand),
        }
    }
}

/// Where problems come from. A trait so tests can swap the random source
/// for a scripted one.
pub trait ProblemSource {
    fn next_problem(&mut self) -> Problem;
}

/// Production source: fixed multiplier, operand drawn uniformly from 1..=10.
#[derive(Debug, Clone, Copy)]
pub struct RandomSource {
    multiplier: u32,
}

impl RandomSource {
    pub fn new(multiplier: u32) -> Self {
        Self { multiplier }
    }
}

impl ProblemSource for RandomSource {
    fn next_problem(&mut self) -> Problem {
        let operand = rand::thread_rng().gen_range(1..=10);
        Problem::new(self.multiplier, operand)
    }
}

/// Scripted source for tests: yields the given operands in order, then
/// repeats the last one.
#[derive(Debug, Clone)]
pub struct FixedSource {
    multiplier: u32,
    operands: Vec<u32>,
    next: usize,
}

impl FixedSource {
    pub fn new(multiplier: u32, operands: Vec<u32>) -> Self {
        assert!(!operands.is_empty());
        Self {
            multiplier,
            operands,
            next: 0,
        }
    }
}

impl ProblemSource for FixedSource {
    fn next_problem(&mut self) -> Problem {
        let operand = self.operands[self.next.min(self.operands.len() - 1)];
        self.next += 1;
        Problem::new(self.multiplier, operand)
    }
}
