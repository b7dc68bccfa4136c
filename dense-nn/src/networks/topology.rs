use super::layer::{check_activation, index_aliases};
use super::{Layer, LayerKind, Network, Neuron};
use crate::activations::ActivationFunction;
use crate::errors::{ConfigurationError, Result};
use crate::parameters::{hyperparameters::INITIAL_WEIGHT_RANGE, NumericRange, ParameterStore};

use rand::Rng;
use tracing::debug;

impl Network {
    /// Creates a network with no layers.
    ///
    /// Layers must then be added in order: one Input layer,
    /// any number of Intermediate layers, and one Output layer.
    ///
    /// # Examples
    /// ```
    /// use dense_nn::activations::ActivationKind;
    /// use dense_nn::Network;
    ///
    /// let mut network = Network::new(0.1);
    /// network
    ///     .add_input(2, &["x", "y"], Some(ActivationKind::Sigmoid.into()))?
    ///     .add_intermediate(3, Some(ActivationKind::Sigmoid.into()))?
    ///     .add_output(1, &["xor"], None)?;
    ///
    /// assert!(network.is_complete());
    /// assert_eq!(network.layers()[2].neurons()[0].weights().len(), 3);
    /// # Ok::<(), dense_nn::Error>(())
    /// ```
    pub fn new(learning_rate: f64) -> Network {
        Network {
            layers: vec![],
            learning_rate,
            cost: None,
            fitness: 0.0,
            hyperparameters: ParameterStore::new(),
        }
    }

    /// Adds the Input layer, with `count` neurons.
    ///
    /// `aliases` is either empty or names every neuron, in order.
    /// `activation` is applied to the sums of the next layer.
    ///
    /// # Errors
    /// Fails without modifying the network if an Input layer already
    /// exists, `count` is zero, the aliases are not `count` unique
    /// names, or `activation` is an output-only function.
    pub fn add_input(
        &mut self,
        count: usize,
        aliases: &[&str],
        activation: Option<ActivationFunction>,
    ) -> Result<&mut Network> {
        self.add_input_with_rng(count, aliases, activation, &mut rand::thread_rng())
    }

    pub fn add_input_with_rng<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        aliases: &[&str],
        activation: Option<ActivationFunction>,
        rng: &mut R,
    ) -> Result<&mut Network> {
        self.add_layer(LayerKind::Input, count, aliases, activation, rng)
    }

    /// Adds an Intermediate layer of `count` neurons after the
    /// last one added. Intermediate neurons cannot have aliases.
    ///
    /// # Errors
    /// Fails without modifying the network if there is no Input layer
    /// yet, the Output layer was already added, `count` is zero, or
    /// `activation` is an output-only function.
    pub fn add_intermediate(
        &mut self,
        count: usize,
        activation: Option<ActivationFunction>,
    ) -> Result<&mut Network> {
        self.add_intermediate_with_rng(count, activation, &mut rand::thread_rng())
    }

    pub fn add_intermediate_with_rng<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        activation: Option<ActivationFunction>,
        rng: &mut R,
    ) -> Result<&mut Network> {
        self.add_layer(LayerKind::Intermediate, count, &[], activation, rng)
    }

    /// Adds the Output layer, completing the network.
    ///
    /// If given, `activation` must be an output-only function; it
    /// post-processes the whole output vector.
    ///
    /// # Errors
    /// Fails without modifying the network if there is no Input layer
    /// yet, an Output layer already exists, `count` is zero, the aliases
    /// are not `count` unique names, or `activation` is element-wise.
    ///
    /// # Examples
    /// ```
    /// use dense_nn::errors::{ConfigurationError, Error};
    /// use dense_nn::Network;
    ///
    /// let mut network = Network::new(0.1);
    /// network.add_input(2, &[], None).unwrap();
    ///
    /// let result = network.add_output(2, &["a", "b", "c"], None);
    /// assert!(matches!(
    ///     result,
    ///     Err(Error::Configuration(ConfigurationError::AliasCountMismatch { neurons: 2, aliases: 3 }))
    /// ));
    /// assert!(!network.is_complete());
    /// ```
    pub fn add_output(
        &mut self,
        count: usize,
        aliases: &[&str],
        activation: Option<ActivationFunction>,
    ) -> Result<&mut Network> {
        self.add_output_with_rng(count, aliases, activation, &mut rand::thread_rng())
    }

    pub fn add_output_with_rng<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        aliases: &[&str],
        activation: Option<ActivationFunction>,
        rng: &mut R,
    ) -> Result<&mut Network> {
        self.add_layer(LayerKind::Output, count, aliases, activation, rng)
    }

    fn add_layer<R: Rng + ?Sized>(
        &mut self,
        kind: LayerKind,
        count: usize,
        aliases: &[&str],
        activation: Option<ActivationFunction>,
        rng: &mut R,
    ) -> Result<&mut Network> {
        self.check_order(kind)?;
        if count == 0 {
            return Err(ConfigurationError::EmptyLayer(kind).into());
        }
        if !aliases.is_empty() {
            if aliases.len() != count {
                return Err(ConfigurationError::AliasCountMismatch {
                    neurons: count,
                    aliases: aliases.len(),
                }
                .into());
            }
            index_aliases(kind, aliases.iter().map(|a| Some(*a)))?;
        }
        if let Some(activation) = &activation {
            check_activation(kind, activation)?;
        }
        let range = self.weight_range()?;

        // All checks passed; nothing is allocated before this point.
        let incoming = self.layers.last().map_or(0, Layer::len);
        let neurons = (0..count)
            .map(|i| {
                let alias = aliases.get(i).map(|a| (*a).to_owned());
                Neuron::random(incoming, alias, range, kind == LayerKind::Input, rng)
            })
            .collect();
        let layer = Layer::new(kind, neurons, activation)?;
        debug!(
            ?kind,
            neurons = count,
            activation = ?layer.activation().map(ActivationFunction::kind),
            "added layer"
        );
        self.layers.push(layer);
        Ok(self)
    }

    fn check_order(&self, kind: LayerKind) -> std::result::Result<(), ConfigurationError> {
        let has_input = self.input_layer().is_some();
        let has_output = self.output_layer().is_some();
        match kind {
            LayerKind::Input if has_input => Err(ConfigurationError::DuplicateLayer(kind)),
            LayerKind::Output if has_output => Err(ConfigurationError::DuplicateLayer(kind)),
            LayerKind::Intermediate | LayerKind::Output if !has_input => {
                Err(ConfigurationError::LayerOrder {
                    added: kind,
                    reason: "before the Input layer",
                })
            }
            LayerKind::Intermediate if has_output => Err(ConfigurationError::LayerOrder {
                added: kind,
                reason: "after the Output layer",
            }),
            _ => Ok(()),
        }
    }

    fn weight_range(&self) -> std::result::Result<NumericRange, ConfigurationError> {
        let range = self.hyperparameters.try_get(&INITIAL_WEIGHT_RANGE)?;
        if range.is_valid() {
            Ok(range)
        } else {
            Err(ConfigurationError::parameter(
                INITIAL_WEIGHT_RANGE.name,
                format!("{} is not an ordered finite range", range),
            ))
        }
    }

    /// Whether both the Input and Output layers exist.
    pub fn is_complete(&self) -> bool {
        self.input_layer().is_some() && self.output_layer().is_some()
    }

    pub(crate) fn check_complete(&self) -> std::result::Result<(), ConfigurationError> {
        if self.input_layer().is_none() {
            Err(ConfigurationError::IncompleteTopology(LayerKind::Input))
        } else if self.output_layer().is_none() {
            Err(ConfigurationError::IncompleteTopology(LayerKind::Output))
        } else {
            Ok(())
        }
    }

    /// Appends a neuron to the layer at `layer`, returning its position.
    ///
    /// The new neuron receives fresh weights from every neuron of the
    /// previous layer, and every neuron of the next layer receives a
    /// fresh weight from it. Existing weights are left untouched.
    ///
    /// # Errors
    /// Fails without modifying the network if the layer does not exist,
    /// or the alias is given for an Intermediate layer or already taken.
    ///
    /// # Examples
    /// ```
    /// use dense_nn::Network;
    ///
    /// let mut network = Network::new(0.1);
    /// network
    ///     .add_input(2, &[], None)?
    ///     .add_intermediate(2, None)?
    ///     .add_output(1, &[], None)?;
    ///
    /// assert_eq!(network.insert_neuron(1, None)?, 2);
    /// assert_eq!(network.layers()[1].neurons()[2].weights().len(), 2);
    /// assert_eq!(network.layers()[2].neurons()[0].weights().len(), 3);
    /// # Ok::<(), dense_nn::Error>(())
    /// ```
    pub fn insert_neuron(&mut self, layer: usize, alias: Option<&str>) -> Result<usize> {
        self.insert_neuron_with_rng(layer, alias, &mut rand::thread_rng())
    }

    pub fn insert_neuron_with_rng<R: Rng + ?Sized>(
        &mut self,
        layer: usize,
        alias: Option<&str>,
        rng: &mut R,
    ) -> Result<usize> {
        let target = self.layers.get(layer).ok_or(ConfigurationError::IndexOutOfRange {
            what: "layer",
            index: layer,
        })?;
        let kind = target.kind;
        if let Some(alias) = alias {
            if kind == LayerKind::Intermediate {
                return Err(ConfigurationError::AliasOnIntermediateLayer.into());
            }
            if target.index_of(alias).is_some() {
                return Err(ConfigurationError::DuplicateAlias(alias.to_owned()).into());
            }
        }
        let range = self.weight_range()?;
        let incoming = match layer {
            0 => 0,
            _ => self.layers[layer - 1].len(),
        };

        let neuron = Neuron::random(
            incoming,
            alias.map(str::to_owned),
            range,
            kind == LayerKind::Input,
            rng,
        );
        let target = &mut self.layers[layer];
        target.neurons.push(neuron);
        target.rebuild_index()?;
        let index = target.len() - 1;
        if let Some(next) = self.layers.get_mut(layer + 1) {
            for neuron in &mut next.neurons {
                neuron.weights.push(range.sample(rng));
            }
        }
        debug!(layer, index, ?kind, "inserted neuron");
        Ok(index)
    }

    /// Removes the neuron at `index` from the layer at `layer`,
    /// along with every connection leading out of it.
    ///
    /// # Errors
    /// Fails without modifying the network if either position does not
    /// exist, or the neuron is the last one of its layer.
    pub fn remove_neuron(&mut self, layer: usize, index: usize) -> Result<Neuron> {
        let target = self
            .layers
            .get_mut(layer)
            .ok_or(ConfigurationError::IndexOutOfRange {
                what: "layer",
                index: layer,
            })?;
        if index >= target.len() {
            return Err(ConfigurationError::IndexOutOfRange {
                what: "neuron",
                index,
            }
            .into());
        }
        if target.len() == 1 {
            return Err(ConfigurationError::EmptyLayer(target.kind).into());
        }
        let removed = target.neurons.remove(index);
        target.rebuild_index()?;
        let kind = target.kind;
        if let Some(next) = self.layers.get_mut(layer + 1) {
            for neuron in &mut next.neurons {
                neuron.weights.remove(index);
            }
        }
        debug!(layer, index, ?kind, "removed neuron");
        Ok(removed)
    }

    /// Replaces the activation function of the layer at `layer`.
    ///
    /// # Errors
    /// Fails if the layer does not exist or cannot hold the function.
    pub fn set_activation(
        &mut self,
        layer: usize,
        activation: Option<ActivationFunction>,
    ) -> Result<()> {
        let target = self
            .layers
            .get_mut(layer)
            .ok_or(ConfigurationError::IndexOutOfRange {
                what: "layer",
                index: layer,
            })?;
        if let Some(activation) = &activation {
            check_activation(target.kind, activation)?;
        }
        target.activation = activation;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activations::ActivationKind;
    use crate::errors::Error;
    use rand::{rngs::StdRng, SeedableRng};

    fn configuration_error<T: std::fmt::Debug>(result: Result<T>) -> ConfigurationError {
        match result {
            Err(Error::Configuration(e)) => e,
            other => panic!("expected a configuration error, got {:?}", other),
        }
    }

    fn small(rng: &mut StdRng) -> Network {
        let mut network = Network::new(0.1);
        network
            .add_input_with_rng(2, &["a", "b"], None, rng)
            .unwrap()
            .add_intermediate_with_rng(3, Some(ActivationKind::Tanh.into()), rng)
            .unwrap()
            .add_output_with_rng(2, &["x", "y"], None, rng)
            .unwrap();
        network
    }

    #[test]
    fn second_input_layer_fails_before_allocation() {
        let mut network = Network::new(0.1);
        network.add_input(3, &[], None).unwrap();
        let e = configuration_error(network.add_input(4, &[], None));
        assert_eq!(e, ConfigurationError::DuplicateLayer(LayerKind::Input));
        assert_eq!(network.layers().len(), 1);
        assert_eq!(network.layers()[0].len(), 3);
    }

    #[test]
    fn second_output_layer_fails() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut network = small(&mut rng);
        let e = configuration_error(network.add_output(1, &[], None));
        assert_eq!(e, ConfigurationError::DuplicateLayer(LayerKind::Output));
        let e = configuration_error(network.add_intermediate(1, None));
        assert!(matches!(e, ConfigurationError::LayerOrder { .. }));
    }

    #[test]
    fn output_alias_count_mismatch() {
        let mut network = Network::new(0.1);
        network.add_input(1, &[], None).unwrap();
        let e = configuration_error(network.add_output(2, &["a", "b", "c"], None));
        assert_eq!(
            e,
            ConfigurationError::AliasCountMismatch {
                neurons: 2,
                aliases: 3
            }
        );
        assert_eq!(network.layers().len(), 1);
    }

    #[test]
    fn layers_out_of_order() {
        let mut network = Network::new(0.1);
        let e = configuration_error(network.add_intermediate(2, None));
        assert!(matches!(e, ConfigurationError::LayerOrder { .. }));
        let e = configuration_error(network.add_output(2, &[], None));
        assert!(matches!(e, ConfigurationError::LayerOrder { .. }));
        assert!(network.layers().is_empty());
    }

    #[test]
    fn invalid_layers() {
        let mut network = Network::new(0.1);
        assert_eq!(
            configuration_error(network.add_input(0, &[], None)),
            ConfigurationError::EmptyLayer(LayerKind::Input)
        );
        assert_eq!(
            configuration_error(network.add_input(2, &["in", "IN"], None)),
            ConfigurationError::DuplicateAlias("IN".into())
        );
        assert_eq!(
            configuration_error(network.add_input(
                1,
                &[],
                Some(ActivationKind::SoftMax.into())
            )),
            ConfigurationError::IncompatibleActivation {
                activation: ActivationKind::SoftMax,
                layer: LayerKind::Input
            }
        );
        network.add_input(1, &[], None).unwrap();
        assert!(matches!(
            configuration_error(network.add_output(1, &[], Some(ActivationKind::ReLU.into()))),
            ConfigurationError::IncompatibleActivation { .. }
        ));
    }

    #[test]
    fn weights_drawn_from_configured_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut network = Network::new(0.1);
        let range = NumericRange::new(0.5, 0.75);
        network.hyperparameters_mut().set(&INITIAL_WEIGHT_RANGE, range);
        network
            .add_input_with_rng(4, &[], None, &mut rng)
            .unwrap()
            .add_output_with_rng(3, &[], None, &mut rng)
            .unwrap();
        for neuron in network.layers()[1].neurons() {
            assert_eq!(neuron.weights().len(), 4);
            assert!(neuron.weights().iter().all(|w| range.contains(*w)));
            assert!(range.contains(neuron.bias()));
        }

        network
            .hyperparameters_mut()
            .set(&INITIAL_WEIGHT_RANGE, NumericRange::new(1.0, 0.0));
        assert!(matches!(
            configuration_error(network.insert_neuron(1, None)),
            ConfigurationError::InvalidParameter { .. }
        ));
    }

    #[test]
    fn insert_resizes_following_layer() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut network = small(&mut rng);
        let before: Vec<Vec<f64>> = network.layers()[1]
            .neurons()
            .iter()
            .map(|n| n.weights().to_vec())
            .collect();

        let index = network.insert_neuron_with_rng(0, Some("c"), &mut rng).unwrap();
        assert_eq!(index, 2);
        assert_eq!(network.layers()[0].index_of("C"), Some(2));
        for (neuron, old) in network.layers()[1].neurons().iter().zip(&before) {
            assert_eq!(neuron.weights().len(), 3);
            assert_eq!(&neuron.weights()[..2], &old[..]);
        }
        assert_eq!(network.forward(&[0.1, 0.2, 0.3]).unwrap().len(), 2);
    }

    #[test]
    fn insert_rejects_bad_aliases() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut network = small(&mut rng);
        assert_eq!(
            configuration_error(network.insert_neuron(1, Some("h"))),
            ConfigurationError::AliasOnIntermediateLayer
        );
        assert_eq!(
            configuration_error(network.insert_neuron(2, Some("X"))),
            ConfigurationError::DuplicateAlias("X".into())
        );
        assert!(matches!(
            configuration_error(network.insert_neuron(3, None)),
            ConfigurationError::IndexOutOfRange { what: "layer", .. }
        ));
        assert_eq!(network.layers()[1].len(), 3);
    }

    #[test]
    fn remove_drops_weight_column() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut network = small(&mut rng);
        let kept: Vec<(f64, f64)> = network.layers()[2]
            .neurons()
            .iter()
            .map(|n| (n.weights()[0], n.weights()[2]))
            .collect();

        network.remove_neuron(1, 1).unwrap();
        assert_eq!(network.layers()[1].len(), 2);
        for (neuron, (first, last)) in network.layers()[2].neurons().iter().zip(kept) {
            assert_eq!(neuron.weights(), &[first, last]);
        }

        let removed = network.remove_neuron(2, 0).unwrap();
        assert_eq!(removed.alias(), Some("x"));
        assert_eq!(network.layers()[2].index_of("y"), Some(0));
        assert_eq!(
            configuration_error(network.remove_neuron(2, 0)),
            ConfigurationError::EmptyLayer(LayerKind::Output)
        );
        assert!(matches!(
            configuration_error(network.remove_neuron(1, 7)),
            ConfigurationError::IndexOutOfRange { what: "neuron", .. }
        ));
    }

    #[test]
    fn set_activation_checks_layer_kind() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut network = small(&mut rng);
        network
            .set_activation(2, Some(ActivationKind::SoftMax.into()))
            .unwrap();
        assert!(network.set_activation(1, Some(ActivationKind::SoftMax.into())).is_err());
        assert_eq!(
            network.layers()[1].activation().map(ActivationFunction::kind),
            Some(ActivationKind::Tanh)
        );
        network.set_activation(1, None).unwrap();
        assert!(network.layers()[1].activation().is_none());
    }
}
