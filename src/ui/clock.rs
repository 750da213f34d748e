use glib::ControlFlow;
use gtk4::prelude::*;
use gtk4::Label;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Clock label that updates every second
pub struct Clock {
    label: Label,
    format: Rc<RefCell<String>>,
}

impl Clock {
    pub fn new(format: &str) -> Self {
        let label = Label::new(None);
        label.add_css_class("clock");

        let format = Rc::new(RefCell::new(format.to_string()));
        Self::update_label(&label, &format.borrow());

        let label_clone = label.clone();
        let format_clone = format.clone();
        glib::timeout_add_local(Duration::from_secs(1), move || {
            Self::update_label(&label_clone, &format_clone.borrow());
            ControlFlow::Continue
        });

        Self { label, format }
    }

    fn update_label(label: &Label, format: &str) {
        label.set_text(&format_time(&chrono::Local::now(), format));
    }

    /// Switch to a new chrono format string, applied immediately
    pub fn set_format(&self, format: &str) {
        *self.format.borrow_mut() = format.to_string();
        Self::update_label(&self.label, format);
    }

    pub fn widget(&self) -> &Label {
        &self.label
    }
}

fn format_time<Tz: chrono::TimeZone>(time: &chrono::DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    use std::fmt::Write;

    // Bad user formats make chrono's Display fail; show nothing instead of panicking
    let mut out = String::new();
    match write!(out, "{}", time.format(format)) {
        Ok(()) => out,
        Err(_) => String::new(),
    }
}
