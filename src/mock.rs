//! Recording doubles for the transport and the interrupt hook.

use std::collections::BTreeMap;

use crate::{DrdyInterrupt, Error, RegisterTransport, SensorError, WritableRegister};

/// One call made on the transport.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Op {
    Init,
    Read(u8),
    Write(u8, Vec<u8>),
    WriteSettings,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BusFault;

/// Transport backed by an in-memory register map.
///
/// Writes land in the map, so a read after a write returns what was written.
/// Unset registers read as zeros.
#[derive(Debug, Default)]
pub(crate) struct MockTransport {
    registers: BTreeMap<u8, Vec<u8>>,
    read_faults: BTreeMap<u8, SensorError>,
    write_faults: BTreeMap<u8, SensorError>,
    bus_down: bool,
    commands_fail: bool,
    pub ops: Vec<Op>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_register<R: WritableRegister>(&mut self, reg: &R) {
        let mut buf = vec![0u8; R::SIZE];
        reg.encode(&mut buf);
        self.registers.insert(R::ID, buf);
    }

    pub fn set_register_bytes(&mut self, id: u8, bytes: &[u8]) {
        self.registers.insert(id, bytes.to_vec());
    }

    /// Reads of `id` answer with `err`.
    pub fn fail_read(&mut self, id: u8, err: SensorError) {
        self.read_faults.insert(id, err);
    }

    /// Writes to `id` answer with `err`.
    pub fn fail_write(&mut self, id: u8, err: SensorError) {
        self.write_faults.insert(id, err);
    }

    /// Every call fails with a bus error.
    pub fn set_bus_down(&mut self, down: bool) {
        self.bus_down = down;
    }

    /// `write_settings` and `reset` fail.
    pub fn set_commands_fail(&mut self, fail: bool) {
        self.commands_fail = fail;
    }

    /// Payload of the most recent write to `id`.
    pub fn last_write(&self, id: u8) -> Option<&[u8]> {
        self.ops.iter().rev().find_map(|op| match op {
            Op::Write(reg, data) if *reg == id => Some(data.as_slice()),
            _ => None,
        })
    }

    pub fn reads(&self, id: u8) -> usize {
        self.count(&Op::Read(id))
    }

    pub fn writes(&self, id: u8) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Write(reg, _) if *reg == id))
            .count()
    }

    pub fn count(&self, op: &Op) -> usize {
        self.ops.iter().filter(|o| *o == op).count()
    }

    fn command(&mut self, op: Op) -> Result<(), Error<BusFault>> {
        self.ops.push(op);
        if self.bus_down || self.commands_fail {
            return Err(Error::Bus(BusFault));
        }

        Ok(())
    }
}

impl RegisterTransport for MockTransport {
    type Error = BusFault;

    fn init(&mut self) -> Result<(), BusFault> {
        self.ops.push(Op::Init);
        if self.bus_down {
            return Err(BusFault);
        }

        Ok(())
    }

    fn read_register(&mut self, id: u8, buf: &mut [u8]) -> Result<(), Error<BusFault>> {
        self.ops.push(Op::Read(id));
        if self.bus_down {
            buf.fill(0xAA);
            return Err(Error::Bus(BusFault));
        }
        if let Some(err) = self.read_faults.get(&id) {
            // Garbage, so that decoding a failed read would show up
            buf.fill(0xAA);
            return Err(Error::Sensor(*err));
        }

        match self.registers.get(&id) {
            Some(bytes) => buf.copy_from_slice(&bytes[..buf.len()]),
            None => buf.fill(0),
        }

        Ok(())
    }

    fn write_register(&mut self, id: u8, data: &[u8]) -> Result<(), Error<BusFault>> {
        self.ops.push(Op::Write(id, data.to_vec()));
        if self.bus_down {
            return Err(Error::Bus(BusFault));
        }
        if let Some(err) = self.write_faults.get(&id) {
            return Err(Error::Sensor(*err));
        }

        self.registers.insert(id, data.to_vec());
        Ok(())
    }

    fn write_settings(&mut self) -> Result<(), Error<BusFault>> {
        self.command(Op::WriteSettings)
    }

    fn reset(&mut self) -> Result<(), Error<BusFault>> {
        self.command(Op::Reset)
    }
}

/// Interrupt hook that remembers registrations and fires them on demand.
#[derive(Debug, Default)]
pub(crate) struct MockInterrupt {
    pub inputs: Vec<u8>,
    pub handlers: Vec<(u8, fn())>,
}

impl MockInterrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates a rising edge on `pin`.
    pub fn fire(&self, pin: u8) {
        for (p, handler) in &self.handlers {
            if *p == pin {
                handler();
            }
        }
    }
}

impl DrdyInterrupt for MockInterrupt {
    fn configure_input(&mut self, pin: u8) {
        self.inputs.push(pin);
    }

    fn attach_rising_edge(&mut self, pin: u8, handler: fn()) {
        self.handlers.push((pin, handler));
    }
}
