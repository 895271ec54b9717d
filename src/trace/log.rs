use crate::playback::cursor::Cursor;
use crate::trace::instruction::Instruction;

/// Instructions produced by inserting one value, in emission order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Command {
    pub name: String,
    pub steps: Vec<Instruction>,
}

impl Command {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Append-only log of commands.
///
/// Positions inside the trace are [`Cursor`]s. Besides the positions of real instructions, the
/// end sentinel `(len, 0)` is a valid position.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Trace {
    commands: Vec<Command>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        debug_assert!(!command.is_empty(), "commands always carry instructions");
        self.commands.push(command);
    }

    pub fn extend(&mut self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.push(command);
        }
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn command(&self, index: usize) -> Option<&Command> {
        self.commands.get(index)
    }

    /// Number of instructions in command `index`, zero past the end.
    pub fn command_len(&self, index: usize) -> usize {
        self.commands.get(index).map_or(0, Command::len)
    }

    pub fn get(&self, at: Cursor) -> Option<&Instruction> {
        self.commands.get(at.command)?.steps.get(at.step)
    }

    pub fn total_instructions(&self) -> usize {
        self.commands.iter().map(Command::len).sum()
    }

    pub fn end(&self) -> Cursor {
        Cursor::new(self.commands.len(), 0)
    }

    /// Position of the final instruction, if there is one.
    pub fn last_position(&self) -> Option<Cursor> {
        let command = self.commands.len().checked_sub(1)?;
        let step = self.commands[command].len().checked_sub(1)?;
        Some(Cursor::new(command, step))
    }

    /// Whether `at` addresses an instruction or is exactly the end sentinel.
    pub fn contains(&self, at: Cursor) -> bool {
        at == self.end() || self.get(at).is_some()
    }

    /// Instructions in trace order with their positions.
    pub fn iter(&self) -> impl Iterator<Item = (Cursor, &Instruction)> {
        self.commands.iter().enumerate().flat_map(|(c, command)| {
            command
                .steps
                .iter()
                .enumerate()
                .map(move |(s, instruction)| (Cursor::new(c, s), instruction))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trace/log.rs"]
mod tests;
