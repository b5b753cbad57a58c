use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use levy_audit::JournalRecord;
use levy_behavior::{CapabilityProbe, SessionBehavior};
use levy_testkit::{ManualClock, MemoryJournal, PaperHost, RecordingNotices, ScriptedSignals};

pub struct StaticCapabilities {
    pub naval: bool,
}

impl CapabilityProbe for StaticCapabilities {
    fn naval_content_present(&self) -> bool {
        self.naval
    }
}

pub struct Session {
    pub behavior: SessionBehavior<PaperHost>,
    pub signals: ScriptedSignals,
    pub clock: Rc<Cell<u64>>,
    pub notices: Rc<RefCell<Vec<String>>>,
    pub journal: Rc<RefCell<Vec<JournalRecord>>>,
}

pub fn make_session(naval: bool) -> Session {
    let catalog = Arc::new(levy_config::load_default().expect("default asset").catalog);
    let signals = ScriptedSignals::safe();
    let clock = ManualClock::at(0);
    let notices = RecordingNotices::new();
    let journal = MemoryJournal::new();

    let behavior = SessionBehavior::new(
        catalog,
        Box::new(signals.clone()),
        Box::new(clock.clone()),
        Box::new(notices.clone()),
        Box::new(journal.clone()),
        &StaticCapabilities { naval },
    );

    Session {
        behavior,
        signals,
        clock: clock.handle(),
        notices: notices.handle(),
        journal: journal.handle(),
    }
}
