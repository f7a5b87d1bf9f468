use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

#[derive(Clone, Debug, PartialEq)]
pub struct ExperimentResults {
    pub train_losses: Vec<f32>,
    pub test_losses: Vec<f32>,
    pub train_accuracies: Vec<f32>,
    pub test_accuracies: Vec<f32>,
    pub shuffled: bool,
}

impl ExperimentResults {
    pub fn epochs(&self) -> usize {
        self.train_losses.len()
    }

    pub fn title_suffix(&self) -> &'static str {
        if self.shuffled {
            "(Shuffle=True)"
        } else {
            "(Shuffle=False)"
        }
    }

    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        let lengths = [
            self.train_losses.len(),
            self.test_losses.len(),
            self.train_accuracies.len(),
            self.test_accuracies.len(),
        ];

        if !lengths.iter().all_equal() {
            return Err(format!("Mismatched metric series lengths: {:?}", lengths).into());
        }

        if self.train_losses.is_empty() {
            return Err("Results contain no epochs".into());
        }

        Ok(())
    }
}

// One row per epoch: train_loss,test_loss,train_acc,test_acc
#[derive(Clone, Copy, Debug, serde::Deserialize)]
struct EpochRecord {
    train_loss: f32,
    test_loss: f32,
    train_acc: f32,
    test_acc: f32,
}

pub fn from_csv<R: std::io::Read>(
    reader: R,
    shuffled: bool,
) -> Result<ExperimentResults, Box<dyn std::error::Error>> {
    let mut results = ExperimentResults {
        train_losses: Vec::new(),
        test_losses: Vec::new(),
        train_accuracies: Vec::new(),
        test_accuracies: Vec::new(),
        shuffled,
    };

    for record in csv::Reader::from_reader(reader).deserialize() {
        let EpochRecord {
            train_loss,
            test_loss,
            train_acc,
            test_acc,
        } = record?;

        results.train_losses.push(train_loss);
        results.test_losses.push(test_loss);
        results.train_accuracies.push(train_acc);
        results.test_accuracies.push(test_acc);
    }

    Ok(results)
}

pub fn from_csv_path(
    path: impl AsRef<std::path::Path>,
    shuffled: bool,
) -> Result<ExperimentResults, Box<dyn std::error::Error>> {
    from_csv(std::fs::File::open(path)?, shuffled)
}

pub fn synthetic(
    epochs: usize,
    shuffled: bool,
    seed: u64,
) -> Result<ExperimentResults, Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(seed);

    let loss_noise = Normal::new(0f32, 0.01)?;
    let accuracy_noise = Normal::new(0f32, 0.4)?;

    // An unshuffled run converges slower and stalls at a worse optimum.
    let decay = if shuffled { 0.30f32 } else { 0.18 };
    let stall = if shuffled { 0f32 } else { 0.35 };

    let mut results = ExperimentResults {
        train_losses: Vec::new(),
        test_losses: Vec::new(),
        train_accuracies: Vec::new(),
        test_accuracies: Vec::new(),
        shuffled,
    };

    for epoch in 0..epochs {
        let progress = (-decay * epoch as f32).exp();

        let train_loss = 0.05 + stall + 2.25 * progress + loss_noise.sample(&mut rng);
        let test_loss = 0.12 + stall + 2.3 * progress + 1.5 * loss_noise.sample(&mut rng);

        let train_accuracy = 97.5 - 8. * stall - 55. * progress + accuracy_noise.sample(&mut rng);
        let test_accuracy =
            95.5 - 8. * stall - 54. * progress + 1.5 * accuracy_noise.sample(&mut rng);

        results.train_losses.push(train_loss.max(0.));
        results.test_losses.push(test_loss.max(0.));
        results.train_accuracies.push(train_accuracy.clamp(0., 100.));
        results.test_accuracies.push(test_accuracy.clamp(0., 100.));
    }

    Ok(results)
}
