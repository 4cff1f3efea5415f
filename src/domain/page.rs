/// Rendered markup captured at one step of the pagination sequence.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub page_number: usize,
    pub page_source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStep {
    Expand,
    Capture,
    Advance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Done(PageStep),
    Failed { step: PageStep, reason: String },
}

/// What happened while working one page index.
#[derive(Debug, Clone, Default)]
pub struct PageOutcome {
    pub page_number: usize,
    pub steps: Vec<StepOutcome>,
}

impl PageOutcome {
    pub fn new(page_number: usize) -> Self {
        PageOutcome {
            page_number,
            steps: vec![],
        }
    }

    pub fn done(&mut self, step: PageStep) {
        self.steps.push(StepOutcome::Done(step));
    }

    pub fn failed(&mut self, step: PageStep, reason: impl ToString) {
        self.steps.push(StepOutcome::Failed {
            step,
            reason: reason.to_string(),
        });
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepOutcome> {
        self.steps
            .iter()
            .filter(|s| matches!(s, StepOutcome::Failed { .. }))
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}
