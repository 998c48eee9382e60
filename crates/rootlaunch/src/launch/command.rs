use super::LaunchArgs;

/// Backends that express a launch as a shell command line.
pub trait CommandTarget: Send + Sync {
    fn label(&self) -> &str {
        "command"
    }

    /// Base `am` invocation, before action, extras and categories.
    fn make_command(&self, args: &LaunchArgs) -> String;

    fn make_escaped_command(&self, args: &LaunchArgs) -> String {
        escape_dollars(&self.make_command(args))
    }
}

/// Escapes `$` so the shell does not expand it. Nothing else is touched.
pub fn escape_dollars(command: &str) -> String {
    command.replace('$', "\\$")
}

/// Escaped base command followed by the request's `am` arguments.
pub fn build_command<T: CommandTarget + ?Sized>(target: &T, args: &LaunchArgs) -> String {
    let mut command = target.make_escaped_command(args);
    args.add_to_command(&mut command);
    command
}
