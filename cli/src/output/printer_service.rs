use anyhow::{anyhow, Context, Error, Result};
use atty::Stream;
use serde::Serialize;
use std::{
    fmt::{self, Debug, Display},
    io::Write,
};
use termcolor::{ColorChoice, StandardStream, WriteColor};

/// Represents the available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFmt {
    Plain,
    Json,
}

impl TryFrom<Option<&str>> for OutputFmt {
    type Error = Error;

    fn try_from(fmt: Option<&str>) -> Result<Self, Self::Error> {
        match fmt {
            Some(fmt) if fmt.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(fmt) if fmt.eq_ignore_ascii_case("plain") => Ok(Self::Plain),
            None => Ok(Self::Plain),
            Some(fmt) => Err(anyhow!(r#"cannot parse output format "{}""#, fmt)),
        }
    }
}

impl Display for OutputFmt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let fmt = match *self {
            OutputFmt::Json => "JSON",
            OutputFmt::Plain => "Plain",
        };
        write!(f, "{}", fmt)
    }
}

/// Represents the output JSON wrapper.
#[derive(Debug, Clone, Serialize)]
struct OutputJson<T: Serialize> {
    response: T,
}

/// Represents data that knows how to print itself as plain text.
pub trait PrintPlain {
    fn print_plain(&self, writer: &mut dyn WriteColor) -> Result<()>;
}

/// Represents the printer service.
pub trait PrinterService {
    /// Prints a simple message.
    fn print_str<T: Debug + Display>(&mut self, data: T) -> Result<()>;
    /// Prints structured data, as a table or as JSON.
    fn print<T: Serialize + PrintPlain>(&mut self, data: T) -> Result<()>;
    fn is_json(&self) -> bool;
}

/// Represents a printer writing to any colored writer.
pub struct Printer<W: WriteColor> {
    writer: W,
    fmt: OutputFmt,
}

/// Represents the printer writing to the standard output.
pub type StdoutPrinter = Printer<StandardStream>;

impl<W: WriteColor> Printer<W> {
    pub fn new(writer: W, fmt: OutputFmt) -> Self {
        Self { writer, fmt }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn print_json<T: Serialize>(&mut self, data: T) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &OutputJson { response: data })
            .context("cannot serialize output")?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: WriteColor> PrinterService for Printer<W> {
    fn print_str<T: Debug + Display>(&mut self, data: T) -> Result<()> {
        match self.fmt {
            OutputFmt::Plain => {
                writeln!(self.writer, "{}", data)?;
                Ok(())
            }
            OutputFmt::Json => self.print_json(data.to_string()),
        }
    }

    fn print<T: Serialize + PrintPlain>(&mut self, data: T) -> Result<()> {
        match self.fmt {
            OutputFmt::Plain => data.print_plain(&mut self.writer),
            OutputFmt::Json => self.print_json(data),
        }
    }

    fn is_json(&self) -> bool {
        self.fmt == OutputFmt::Json
    }
}

impl TryFrom<Option<&str>> for StdoutPrinter {
    type Error = Error;

    fn try_from(fmt: Option<&str>) -> Result<Self, Self::Error> {
        let fmt = OutputFmt::try_from(fmt)?;
        let color_choice = if fmt == OutputFmt::Plain && atty::is(Stream::Stdout) {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Ok(Self::new(StandardStream::stdout(color_choice), fmt))
    }
}

#[cfg(test)]
mod tests {
    use termcolor::Buffer;

    use super::*;

    struct Greeting;

    impl Serialize for Greeting {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str("hello")
        }
    }

    impl PrintPlain for Greeting {
        fn print_plain(&self, writer: &mut dyn WriteColor) -> Result<()> {
            writeln!(writer, "Hello!")?;
            Ok(())
        }
    }

    fn output(fmt: OutputFmt, run: impl FnOnce(&mut Printer<Buffer>) -> Result<()>) -> String {
        let mut printer = Printer::new(Buffer::no_color(), fmt);
        run(&mut printer).unwrap();
        String::from_utf8(printer.into_inner().into_inner()).unwrap()
    }

    #[test]
    fn it_should_parse_output_fmt() {
        assert_eq!(OutputFmt::try_from(None).unwrap(), OutputFmt::Plain);
        assert_eq!(OutputFmt::try_from(Some("JSON")).unwrap(), OutputFmt::Json);
        assert!(OutputFmt::try_from(Some("xml")).is_err());
    }

    #[test]
    fn it_should_print_plain() {
        assert_eq!(output(OutputFmt::Plain, |p| p.print_str("done")), "done\n");
        assert_eq!(output(OutputFmt::Plain, |p| p.print(Greeting)), "Hello!\n");
    }

    #[test]
    fn it_should_print_json() {
        assert_eq!(
            output(OutputFmt::Json, |p| p.print_str("done")),
            "{\"response\":\"done\"}\n"
        );
        assert_eq!(
            output(OutputFmt::Json, |p| p.print(Greeting)),
            "{\"response\":\"hello\"}\n"
        );
    }
}
