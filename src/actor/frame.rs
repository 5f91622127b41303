use crate::{
    actor::error::{ActorError, internal_error, invalid_payload},
    signal::{Signal, Token},
};

/// What an actor sees of its ports during one lifecycle call.
///
/// Inputs are a snapshot for the call. Outputs start from whatever the
/// channel already holds this tick, and every write goes through
/// [`Signal::merge`], so a channel can be resolved once and never changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortFrame {
    inputs: Vec<Vec<Signal>>,
    outputs: Vec<Vec<Signal>>,
}

impl PortFrame {
    /// A frame with every channel unknown.
    pub fn new(input_widths: &[usize], output_widths: &[usize]) -> Self {
        Self {
            inputs: input_widths
                .iter()
                .map(|width| vec![Signal::Unknown; *width])
                .collect(),
            outputs: output_widths
                .iter()
                .map(|width| vec![Signal::Unknown; *width])
                .collect(),
        }
    }

    pub fn from_signals(inputs: Vec<Vec<Signal>>, outputs: Vec<Vec<Signal>>) -> Self {
        Self { inputs, outputs }
    }

    pub fn input_width(&self, port: usize) -> usize {
        self.inputs.get(port).map_or(0, Vec::len)
    }

    pub fn output_width(&self, port: usize) -> usize {
        self.outputs.get(port).map_or(0, Vec::len)
    }

    pub fn signal(&self, port: usize, channel: usize) -> Result<&Signal, ActorError> {
        self.inputs
            .get(port)
            .and_then(|channels| channels.get(channel))
            .ok_or_else(|| {
                internal_error(format!("no input channel {channel} on port {port}"))
            })
    }

    pub fn is_known(&self, port: usize, channel: usize) -> Result<bool, ActorError> {
        Ok(self.signal(port, channel)?.is_known())
    }

    /// Only meaningful once the channel is known; unknown reads as no token.
    pub fn has_token(&self, port: usize, channel: usize) -> Result<bool, ActorError> {
        Ok(self.signal(port, channel)?.is_present())
    }

    pub fn get(&self, port: usize, channel: usize) -> Result<&Token, ActorError> {
        match self.signal(port, channel)? {
            Signal::Present(token) => Ok(token),
            other => Err(invalid_payload(format!(
                "read on input port {port} channel {channel} which is {other}"
            ))),
        }
    }

    pub fn is_port_known(&self, port: usize) -> bool {
        self.inputs
            .get(port)
            .is_none_or(|channels| channels.iter().all(Signal::is_known))
    }

    pub fn all_inputs_known(&self) -> bool {
        self.inputs.iter().flatten().all(Signal::is_known)
    }

    pub fn inputs(&self) -> &[Vec<Signal>] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Vec<Signal>] {
        &self.outputs
    }

    pub fn output(&self, port: usize, channel: usize) -> Result<&Signal, ActorError> {
        self.outputs
            .get(port)
            .and_then(|channels| channels.get(channel))
            .ok_or_else(|| {
                internal_error(format!("no output channel {channel} on port {port}"))
            })
    }

    pub fn is_output_known(&self, port: usize, channel: usize) -> Result<bool, ActorError> {
        Ok(self.output(port, channel)?.is_known())
    }

    pub fn send(&mut self, port: usize, channel: usize, token: Token) -> Result<(), ActorError> {
        self.write(port, channel, Signal::Present(token))
    }

    pub fn send_clear(&mut self, port: usize, channel: usize) -> Result<(), ActorError> {
        self.write(port, channel, Signal::Absent)
    }

    /// Writes an already-resolved signal; `Unknown` is a no-op.
    pub fn send_signal(
        &mut self,
        port: usize,
        channel: usize,
        signal: Signal,
    ) -> Result<(), ActorError> {
        self.write(port, channel, signal)
    }

    pub fn broadcast_clear(&mut self, port: usize) -> Result<(), ActorError> {
        for channel in 0..self.output_width(port) {
            self.send_clear(port, channel)?;
        }
        Ok(())
    }

    /// Resolves every still-unknown output channel to absent.
    pub fn clear_unknown_outputs(&mut self) {
        for signal in self.outputs.iter_mut().flatten() {
            if !signal.is_known() {
                *signal = Signal::Absent;
            }
        }
    }

    /// Resets every channel to unknown, keeping the widths.
    pub fn reset(&mut self) {
        for signal in self.inputs.iter_mut().chain(self.outputs.iter_mut()).flatten() {
            *signal = Signal::Unknown;
        }
    }

    /// Monotone update of one input channel, used by drivers that feed a frame.
    pub fn set_input(
        &mut self,
        port: usize,
        channel: usize,
        signal: Signal,
    ) -> Result<bool, ActorError> {
        let slot = self
            .inputs
            .get_mut(port)
            .and_then(|channels| channels.get_mut(channel))
            .ok_or_else(|| {
                internal_error(format!("no input channel {channel} on port {port}"))
            })?;
        slot.merge(signal)
    }

    fn write(&mut self, port: usize, channel: usize, signal: Signal) -> Result<(), ActorError> {
        let slot = self
            .outputs
            .get_mut(port)
            .and_then(|channels| channels.get_mut(channel))
            .ok_or_else(|| {
                internal_error(format!("no output channel {channel} on port {port}"))
            })?;
        slot.merge(signal).map(|_| ()).map_err(|err| ActorError {
            message: format!("output port {port} channel {channel}: {}", err.message),
            ..err
        })
    }
}
