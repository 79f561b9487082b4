use hll_murmur::{murmur64, CardinalityEstimator};

fn main() {
    let mut estimator1: CardinalityEstimator = CardinalityEstimator::new(1024).unwrap();
    for i in 0..10 {
        estimator1.add(murmur64(i));
    }
    println!("estimator1 estimate = {}", estimator1.count());

    let mut estimator2: CardinalityEstimator = CardinalityEstimator::new(1024).unwrap();
    for i in 10..15 {
        estimator2.add(murmur64(i));
    }
    println!("estimator2 estimate = {}", estimator2.count());

    estimator1.merge(&estimator2).unwrap();
    println!("merged estimate = {}", estimator1.count());

    let registers = estimator1.registers().to_vec();
    let restored: CardinalityEstimator = CardinalityEstimator::from_registers(registers).unwrap();
    println!("restored estimate = {}", restored.count());
}
