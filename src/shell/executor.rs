use log::debug;

use crate::error::ShellError;
use crate::input::tokenize;
use crate::input::tokenizer::MAX_NUM_ARGUMENTS;

pub(crate) trait CommandHandler {
    fn execute_command(&mut self, command: &str) -> Result<(), ShellError>;
}

impl CommandHandler for super::Shell {
    fn execute_command(&mut self, command: &str) -> Result<(), ShellError> {
        // A bad `!N` abandons the line before anything is recorded
        let expanded = self.state.history.expand(command)?;

        let tokens = tokenize(&expanded, MAX_NUM_ARGUMENTS);
        let Some(name) = tokens.first() else {
            return Ok(());
        };

        self.state.history.record(&expanded);
        let args = tokens.args();

        if let Some(builtin) = self.builtins.get(name) {
            let mut builtin_args = args[1..].to_vec();
            // An argument lost to an empty field is passed as "" rather than omitted
            if builtin_args.is_empty() && tokens.has_gap() {
                builtin_args.push("");
            }
            debug!("builtin {} with {:?}", name, builtin_args);
            builtin.execute(&builtin_args, &mut self.state, &mut *self.out)?;
            return Ok(());
        }

        debug!("launching {:?}", args);
        self.out.flush()?;
        self.err.flush()?;
        let child = self.launcher.launch(&args)?;
        self.state.pids.record(child.pid);

        Ok(())
    }
}
