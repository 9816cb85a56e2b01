use rand::Rng;

use crate::{
    errors::errors::RuntimeError,
    symbols::{builtins, symbols::FunctionSymbol, value::Value},
};

use super::evaluator::Evaluator;

fn argument<'v>(function: &FunctionSymbol, arguments: &'v [Value], index: usize) -> Result<&'v Value, RuntimeError> {
    arguments.get(index).ok_or_else(|| RuntimeError::InvalidArgument {
        function: function.name().to_string(),
        message: format!("missing argument {}", index + 1),
    })
}

/// Runs `print`, `input` or `rnd` against the evaluator's host and generator.
pub fn call_builtin(
    evaluator: &mut Evaluator,
    function: &FunctionSymbol,
    arguments: &[Value],
) -> Result<Option<Value>, RuntimeError> {
    if *function == *builtins::PRINT {
        let text = argument(function, arguments, 0)?;
        evaluator.host.write_line(&text.to_string())?;
        Ok(None)
    } else if *function == *builtins::INPUT {
        let line = evaluator.host.read_line()?;
        Ok(Some(Value::String(line)))
    } else if *function == *builtins::RND {
        let max = argument(function, arguments, 0)?;
        let max = max.as_int().ok_or_else(|| RuntimeError::InvalidArgument {
            function: function.name().to_string(),
            message: format!("expected an int but found '{max}'"),
        })?;

        match max {
            0 => Ok(Some(Value::Int(0))),
            max if max < 0 => Err(RuntimeError::InvalidArgument {
                function: function.name().to_string(),
                message: format!("max must not be negative, got {max}"),
            }),
            max => Ok(Some(Value::Int(evaluator.rng.gen_range(0..max)))),
        }
    } else {
        Err(RuntimeError::MissingFunctionBody {
            function: function.name().to_string(),
        })
    }
}
