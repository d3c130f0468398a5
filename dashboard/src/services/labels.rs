//! QR label modal: settings, live preview and print output

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{
    clamp_copies, encode_label_payload, format_money, InventoryItem, LabelDimensions, LabelSize, LabelTemplate,
    StockStatus,
};

use crate::config::LabelConfig;
use crate::error::{AppError, AppResult};

/// Tab shown while the modal is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalView {
    Preview,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "view", rename_all = "snake_case")]
pub enum ModalState {
    Closed,
    Open(ModalView),
}

/// Print settings edited on the settings tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSettings {
    pub size: LabelSize,
    pub template: LabelTemplate,
    pub copies: u32,
    pub include_date: bool,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            size: LabelSize::default(),
            template: LabelTemplate::default(),
            copies: 1,
            include_date: true,
        }
    }
}

impl From<&LabelConfig> for LabelSettings {
    fn from(config: &LabelConfig) -> Self {
        Self {
            size: config.size,
            template: config.template,
            copies: clamp_copies(config.copies),
            include_date: config.include_date,
        }
    }
}

/// One printed label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedLabel {
    /// JSON embedded in the QR code
    pub payload: String,
    pub qr_size: u32,
    pub lines: Vec<String>,
    pub status: StockStatus,
    pub date: Option<String>,
}

/// Everything the preview pane and print job need
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelPreview {
    pub filename: String,
    pub dimensions: LabelDimensions,
    pub settings: LabelSettings,
    pub labels: Vec<RenderedLabel>,
}

/// Label modal for one item: `Closed -> Open(Preview) <-> Open(Settings) -> Closed`
#[derive(Debug, Clone)]
pub struct LabelModal {
    item: InventoryItem,
    state: ModalState,
    defaults: LabelSettings,
    settings: LabelSettings,
}

impl LabelModal {
    pub fn new(item: InventoryItem, defaults: LabelSettings) -> Self {
        Self {
            item,
            state: ModalState::Closed,
            defaults,
            settings: defaults,
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn settings(&self) -> LabelSettings {
        self.settings
    }

    pub fn item(&self) -> &InventoryItem {
        &self.item
    }

    fn transition(&mut self, action: &str, next: ModalState) -> AppResult<()> {
        let allowed = matches!(
            (self.state, next),
            (ModalState::Closed, ModalState::Open(ModalView::Preview))
                | (ModalState::Open(ModalView::Preview), ModalState::Open(ModalView::Settings))
                | (ModalState::Open(ModalView::Settings), ModalState::Open(ModalView::Preview))
                | (ModalState::Open(_), ModalState::Closed)
        );
        if !allowed {
            return Err(AppError::InvalidStateTransition(format!(
                "Cannot {} the label modal while it is {:?}",
                action, self.state
            )));
        }
        tracing::debug!(sku = %self.item.sku, from = ?self.state, to = ?next, "Label modal transition");
        self.state = next;
        Ok(())
    }

    pub fn open(&mut self) -> AppResult<()> {
        self.transition("open", ModalState::Open(ModalView::Preview))
    }

    pub fn show_settings(&mut self) -> AppResult<()> {
        self.transition("show settings of", ModalState::Open(ModalView::Settings))
    }

    pub fn show_preview(&mut self) -> AppResult<()> {
        self.transition("show preview of", ModalState::Open(ModalView::Preview))
    }

    /// Close and forget the session's settings
    pub fn close(&mut self) -> AppResult<()> {
        self.transition("close", ModalState::Closed)?;
        self.settings = self.defaults;
        Ok(())
    }

    fn ensure_open(&self, action: &str) -> AppResult<()> {
        match self.state {
            ModalState::Open(_) => Ok(()),
            ModalState::Closed => Err(AppError::InvalidStateTransition(format!(
                "Cannot {} while the label modal is closed",
                action
            ))),
        }
    }

    pub fn set_size(&mut self, size: LabelSize) -> AppResult<()> {
        self.ensure_open("change label size")?;
        self.settings.size = size;
        Ok(())
    }

    pub fn set_template(&mut self, template: LabelTemplate) -> AppResult<()> {
        self.ensure_open("change label template")?;
        self.settings.template = template;
        Ok(())
    }

    /// Copies are clamped to the printable range
    pub fn set_copies(&mut self, copies: u32) -> AppResult<()> {
        self.ensure_open("change copies")?;
        self.settings.copies = clamp_copies(copies);
        Ok(())
    }

    pub fn set_include_date(&mut self, include_date: bool) -> AppResult<()> {
        self.ensure_open("change date printing")?;
        self.settings.include_date = include_date;
        Ok(())
    }

    /// File name of the print export
    pub fn print_filename(&self) -> String {
        format!("{}-label.pdf", self.item.sku)
    }

    /// Preview with the current settings applied
    pub fn preview(&self, today: NaiveDate) -> AppResult<LabelPreview> {
        self.ensure_open("preview")?;

        let label = render_label(&self.item, &self.settings, today)?;
        Ok(LabelPreview {
            filename: self.print_filename(),
            dimensions: self.settings.size.dimensions(),
            settings: self.settings,
            labels: vec![label; self.settings.copies as usize],
        })
    }
}

/// Render one label for an item
pub fn render_label(item: &InventoryItem, settings: &LabelSettings, today: NaiveDate) -> AppResult<RenderedLabel> {
    let payload = encode_label_payload(item, settings.template).to_json()?;
    let status = item.status();
    let value = format_money(item.unit_value);

    let lines = match settings.template {
        LabelTemplate::Basic => vec![
            item.name.clone(),
            format!("SKU: {}", item.sku),
            format!("Location: {}", item.location),
            format!("Stock: {}", item.stock),
        ],
        LabelTemplate::Detailed => vec![
            item.name.clone(),
            format!("SKU: {}", item.sku),
            format!("Category: {}", item.category),
            format!("Value: {}", value),
            format!("Status: {}", status),
            format!("Stock: {} / Min: {}", item.stock, item.min_stock),
            format!("Location: {}", item.location),
        ],
        LabelTemplate::Compact => vec![
            item.name.clone(),
            format!("SKU: {}", item.sku),
            format!("Loc: {}", item.location),
            format!("Qty: {}", item.stock),
            value,
        ],
    };

    // only the detailed layout has room for a date
    let date = (settings.include_date && settings.template == LabelTemplate::Detailed)
        .then(|| today.format("%m/%d/%Y").to_string());

    Ok(RenderedLabel {
        payload,
        qr_size: settings.size.dimensions().qr_size,
        lines,
        status,
        date,
    })
}
