use core::convert::Infallible;

use embedded_hal::digital::StatefulOutputPin;
use heapless::Deque;
use ufmt::uwriteln;

use crate::command::{self, Command, RangeError};
use crate::input::{Line, LineAssembler, LineTokenizer};
use crate::motion::{MotionController, RampPlan};
use crate::report::{Measurement, Reporter};
use crate::sensor::AnalogInput;
use crate::serial::SerialPort;
use crate::timer::SoftTimer;
use crate::{Actuator, Config, Milliseconds, Position};

/// Number of lines that may wait for the motion state machine.
pub const QUEUE_DEPTH: usize = 4;

/// Everything that the quit command throws away.
struct Session<const N: usize> {
    heartbeat: SoftTimer,
    motion: MotionController,
    reporter: Reporter,
    measurement: Measurement,
    cmd_finished: bool,
    high_priority: Option<Line<N>>,
    queue: Deque<Line<N>, QUEUE_DEPTH>,
}
impl<const N: usize> Session<N> {
    fn new(config: &Config, last_position: Position) -> Self {
        Self {
            heartbeat: SoftTimer::new(config.heartbeat_interval),
            motion: MotionController::new(),
            reporter: Reporter::new(
                config.settle_time,
                config.report_interval,
                last_position,
            ),
            measurement: Measurement::zero(),
            cmd_finished: false,
            high_priority: None,
            queue: Deque::new(),
        }
    }
}

/// The throttle mapper control loop.
///
/// The controller is driven by calling [Controller::tick] as often as
/// possible. Nothing in a tick blocks except the analog read; long-running
/// commands are re-entered on every tick until they finish.
///
/// # Type Parameters
///
/// - `A`: The actuator being driven.
/// - `S`: The sensor measuring the actuator output.
/// - `L`: The heartbeat LED.
/// - `N`: Capacity of the serial line buffer.
pub struct Controller<A, S, L, const N: usize> {
    actuator: A,
    sensor: S,
    led: L,
    config: Config,
    session: Session<N>,
    assembler: LineAssembler<N>,
    tokenizer: LineTokenizer,
}

impl<A, S, L, const N: usize> Controller<A, S, L, N>
where
    A: Actuator,
    S: AnalogInput,
    L: StatefulOutputPin<Error = Infallible>,
{
    /// Creates a new controller.
    ///
    /// The actuator should already be at a known position.
    pub fn new(actuator: A, sensor: S, led: L, config: Config) -> Self {
        let session = Session::new(&config, actuator.position());
        Self {
            actuator,
            sensor,
            led,
            session,
            assembler: LineAssembler::new(config.idle_timeout),
            tokenizer: LineTokenizer::new(),
            config,
        }
    }

    /// Returns the actuator.
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Returns the motion state machine.
    pub fn motion(&self) -> &MotionController {
        &self.session.motion
    }

    /// Returns the number of lines waiting to be dispatched.
    pub fn queued(&self) -> usize {
        self.session.queue.len()
    }

    /// Runs one iteration of the control loop.
    ///
    /// # Parameters
    ///
    /// - `serial`: The serial link to read commands from and report to.
    /// - `now`: Current time.
    pub fn tick<P: SerialPort>(
        &mut self,
        serial: &mut P,
        now: Milliseconds,
    ) -> Result<(), P::Error> {
        self.heartbeat(now);
        self.measure(now);

        if self.session.reporter.poll(now) {
            uwriteln!(serial, "D{}", self.session.measurement)?;
        }

        // The end marker waits for the final position to be reported.
        if self.session.cmd_finished && !self.session.reporter.has_pending() {
            self.session.cmd_finished = false;
            uwriteln!(serial, "E")?;
        }

        self.receive(serial, now)?;
        self.dispatch(serial, now)?;

        if let Some(line) = self.session.high_priority.take() {
            uwriteln!(serial, "H")?;
            self.execute(serial, &line, now)?;
        }

        Ok(())
    }

    fn heartbeat(&mut self, now: Milliseconds) {
        if self.session.heartbeat.expired(now) {
            if let Err(never) = self.led.toggle() {
                match never {}
            }
            self.session.heartbeat.start(now);
        }
    }

    fn measure(&mut self, now: Milliseconds) {
        let position = self.actuator.position();
        self.session.measurement = Measurement {
            voltage: self.sensor.read_millivolts(),
            position,
            resistance_ohms: self.actuator.resistance_ohms(),
            timestamp: now,
        };
        self.session.reporter.observe(position, now);
    }

    /// Drains received bytes into lines.
    ///
    /// At most one buffer's worth of bytes is taken per tick. Reading stops
    /// after a quit line, so that lines sent after it survive the reset and
    /// are read on the next tick.
    fn receive<P: SerialPort>(
        &mut self,
        serial: &mut P,
        now: Milliseconds,
    ) -> Result<(), P::Error> {
        for _ in 0..=N {
            let byte = serial.read_byte();
            match self.assembler.poll(byte, now) {
                Ok(line) if line.is_high_priority() => {
                    self.accept(serial, line)?;
                    break;
                }
                Ok(line) => self.accept(serial, line)?,
                // Dropped lines are not reported.
                Err(nb::Error::Other(_)) => {}
                Err(nb::Error::WouldBlock) => {}
            }
            if byte.is_none() {
                break;
            }
        }
        Ok(())
    }

    fn accept<P: SerialPort>(
        &mut self,
        serial: &mut P,
        line: Line<N>,
    ) -> Result<(), P::Error> {
        if self.config.echo {
            if let Ok(text) = core::str::from_utf8(line.as_bytes()) {
                serial.write_str(text)?;
            }
        }

        let busy =
            !(self.session.motion.is_idle() && self.session.queue.is_empty());
        if line.is_high_priority() && busy {
            self.session.high_priority = Some(line);
        } else if self.session.queue.push_back(line).is_err() {
            uwriteln!(serial, "  {}", command::Error::QueueFull)?;
        }
        Ok(())
    }

    fn dispatch<P: SerialPort>(
        &mut self,
        serial: &mut P,
        now: Milliseconds,
    ) -> Result<(), P::Error> {
        if self.session.motion.is_idle() {
            if self.session.cmd_finished {
                return Ok(());
            }
            if let Some(line) = self.session.queue.pop_front() {
                uwriteln!(serial, "R")?;
                self.execute(serial, &line, now)?;
                self.session.motion.begin();
            }
        } else if self.session.motion.poll(&mut self.actuator, now) {
            self.session.cmd_finished = true;
        }
        Ok(())
    }

    fn execute<P: SerialPort>(
        &mut self,
        serial: &mut P,
        line: &Line<N>,
        now: Milliseconds,
    ) -> Result<(), P::Error> {
        let parsed = Command::parse(line.as_bytes(), &mut self.tokenizer);
        let result = match parsed {
            Ok(command) => self.apply(command, now),
            Err(error) => Err(error),
        };
        if let Err(error) = result {
            uwriteln!(serial, "  {}", error)?;
        }
        Ok(())
    }

    /// Applies a parsed command.
    fn apply(
        &mut self,
        command: Command,
        now: Milliseconds,
    ) -> Result<(), command::Error> {
        match command {
            Command::RampTo {
                target,
                duration: None,
            } => self.actuator.set_position(target),
            Command::RampTo {
                target,
                duration: Some(duration),
            } => {
                let plan =
                    RampPlan::new(self.actuator.position(), target, duration)
                        .ok_or(command::Error::Range(RangeError::NoSteps))?;
                self.session.motion.start_ramp(plan, now);
            }
            Command::Step { delta } => {
                let position = self
                    .actuator
                    .position()
                    .offset(delta)
                    .ok_or(command::Error::Range(RangeError::Throttle))?;
                self.actuator.set_position(position);
            }
            Command::Wait { duration } => {
                self.session.motion.start_wait(duration, now)
            }
            Command::Read => self.session.reporter.request(),
            Command::Quit => self.reset(),
        }
        Ok(())
    }

    /// Zeroes the actuator and discards the session.
    fn reset(&mut self) {
        let last_position = self.actuator.position();
        self.actuator.set_position(Position::zero());
        self.session = Session::new(&self.config, last_position);
    }
}
