use crate::errors::Result;

pub enum FlowCtrl {
    Continue,
    Finish,
}

/// One screen of the line-driven front end.
pub trait Flow {
    fn render(&mut self) -> Result<()>;
    fn handle_input(&mut self, input: &str) -> Result<FlowCtrl>;
}

/// Parsed calendar command line.
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarCommand {
    Key(String),
    Goto(String),
    Select(String),
    Click { day: String, px: String },
    QuickAdd(String),
    SubmitDialog(String),
    Cancel,
    DownCell(String),
    DownEvent { occurrence_id: String, day: String, px: String },
    DownEdge { occurrence_id: String, px: String },
    Move { day: String, px: String },
    Up { day: String, px: String },
    Delete(String),
    Focus(String),
    Log,
    ShowConfig,
    Set { key: String, value: String },
    Help,
}
