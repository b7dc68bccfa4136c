use super::Network;

use rand::Rng;
use tracing::debug;

impl Network {
    /// Returns a mutated copy of the network, leaving the original
    /// untouched. See [`mutate_in_place`](Network::mutate_in_place)
    /// for the meaning of the arguments.
    ///
    /// # Examples
    /// ```
    /// use dense_nn::Network;
    ///
    /// let mut network = Network::new(0.1);
    /// network.add_input(2, &[], None)?.add_output(2, &[], None)?;
    ///
    /// let child = network.mutate_new(1.0, 0.5);
    /// assert_ne!(child.layers()[1].neurons(), network.layers()[1].neurons());
    /// assert_eq!(child.layers().len(), network.layers().len());
    /// # Ok::<(), dense_nn::Error>(())
    /// ```
    pub fn mutate_new(&self, probability: f64, severity: f64) -> Network {
        self.mutate_new_with_rng(probability, severity, &mut rand::thread_rng())
    }

    pub fn mutate_new_with_rng<R: Rng + ?Sized>(
        &self,
        probability: f64,
        severity: f64,
        rng: &mut R,
    ) -> Network {
        let mut child = self.clone();
        child.mutate_in_place_with_rng(probability, severity, rng);
        child
    }

    /// Perturbs this network's weights and biases in place.
    ///
    /// Each weight and bias is independently nudged with chance
    /// `probability`, by a random non-zero amount of magnitude at most
    /// `severity`. Values larger than 1 in magnitude are nudged relative
    /// to their size instead, by at most `severity * |value|`, so the
    /// change is never lost to rounding. A non-positive `severity`
    /// leaves every value as is. Topology is never changed, and Input neurons, which carry no
    /// trainable parameters, are skipped.
    ///
    /// Returns how many values were perturbed.
    ///
    /// Prefer [`mutate_new`](Network::mutate_new) when the original
    /// network may still be needed.
    pub fn mutate_in_place(&mut self, probability: f64, severity: f64) -> usize {
        self.mutate_in_place_with_rng(probability, severity, &mut rand::thread_rng())
    }

    pub fn mutate_in_place_with_rng<R: Rng + ?Sized>(
        &mut self,
        probability: f64,
        severity: f64,
        rng: &mut R,
    ) -> usize {
        if !(severity > 0.0 && severity.is_finite()) {
            return 0;
        }
        let mut nudge = |value: &mut f64| {
            if rng.gen::<f64>() < probability {
                // In (0, severity]; scaling keeps it above the value's ulp.
                let magnitude =
                    (severity - rng.gen_range(0.0..severity)) * value.abs().max(1.0);
                *value += if rng.gen::<bool>() { magnitude } else { -magnitude };
                1
            } else {
                0
            }
        };

        let mut mutated = 0;
        for neuron in self.layers.iter_mut().skip(1).flat_map(|l| &mut l.neurons) {
            mutated += nudge(&mut neuron.bias);
            for weight in neuron.weights.iter_mut() {
                mutated += nudge(weight);
            }
        }
        debug!(mutated, probability, severity, "mutated network");
        mutated
    }

    /// Score assigned by an external selection process.
    /// The engine never reads or changes it.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}
