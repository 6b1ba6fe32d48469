use anyhow::{bail, Context, Result};
use clap::Parser;

use inline_date_picker::cli::{CliArgs, CliCommand, ConfigAction, ViewArgs};
use inline_date_picker::commands::{self, CommandOutcome};
use inline_date_picker::config::{PickerSettings, SettingsStore};
use inline_date_picker::config_paths;
use inline_date_picker::decoration::{HeadlessDateInput, PickerEvent, PickerLayer, PickerOutcome};
use inline_date_picker::model::{Document, Position, Viewport};
use inline_date_picker::plugin::DatePickerViewPlugin;
use inline_date_picker::view::MarkdownView;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    inline_date_picker::tracing::init();

    let mut settings = SettingsStore::new(PickerSettings::load());
    if let Some(format) = &args.format {
        settings.set_date_format(format);
    }

    match args.command {
        CliCommand::Scan { view } => scan(&view, &mut settings),
        CliCommand::Pick {
            view,
            at,
            date,
            cursor,
            write,
        } => pick(&view, at, &date, cursor, write, &mut settings),
        CliCommand::Today {
            view,
            link,
            line,
            column,
            write,
        } => today(&view, link, line, column, write, &settings),
        CliCommand::Open { view, cursor } => open(&view, cursor, &mut settings),
        CliCommand::Config { action } => config(action, &mut settings),
    }
}

fn open_view(args: &ViewArgs) -> Result<MarkdownView> {
    let document = Document::from_file(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let visible_lines = args.lines.unwrap_or_else(|| document.line_count());
    let viewport = Viewport {
        top_line: args.top_line.saturating_sub(1),
        visible_lines,
        folds: Vec::new(),
    };
    Ok(MarkdownView::new(document, viewport))
}

fn emit(view: &MarkdownView, args: &ViewArgs, write: bool) -> Result<()> {
    if write {
        std::fs::write(&args.file, view.document.to_string())
            .with_context(|| format!("Failed to write {}", args.file.display()))?;
        tracing::info!("Wrote {}", args.file.display());
    } else {
        print!("{}", view.document);
    }
    Ok(())
}

fn scan(args: &ViewArgs, settings: &mut SettingsStore) -> Result<()> {
    let view = open_view(args)?;
    let plugin = DatePickerViewPlugin::new(&view, settings);

    if plugin.widgets().is_empty() {
        eprintln!("No date widgets found");
    }
    for widget in plugin.widgets() {
        let pos = view.document.offset_to_position(widget.from());
        println!(
            "{}:{}\t{}..{}\t{}\t{:?}",
            pos.line + 1,
            pos.column + 1,
            widget.from(),
            widget.to(),
            widget.date(),
            widget.wrapping()
        );
    }
    Ok(())
}

fn pick(
    args: &ViewArgs,
    at: usize,
    date: &str,
    cursor: Option<usize>,
    write: bool,
    settings: &mut SettingsStore,
) -> Result<()> {
    let mut view = open_view(args)?;
    if let Some(cursor) = cursor {
        view.set_cursor_offset(cursor);
    }

    let mut plugin = DatePickerViewPlugin::new(&view, settings);
    let mut layer = PickerLayer::new();
    layer.sync(&plugin.decorations(), HeadlessDateInput::default);

    let Some(picker) = layer.picker_at_mut(at) else {
        bail!("No date picker at offset {}", at);
    };
    picker.show_picker();
    picker.control_mut().pick(date);
    let outcome = picker.handle_event(PickerEvent::Change, &mut view);
    if outcome != PickerOutcome::Committed {
        bail!("Date {} was not applied ({:?})", date, outcome);
    }

    let update = view.take_update();
    plugin.update(&update, &view, settings);
    tracing::info!(
        widgets = plugin.widgets().len(),
        cursor = view.cursor_offset(),
        "picked {}",
        date
    );

    emit(&view, args, write)
}

fn today(
    args: &ViewArgs,
    link: bool,
    line: usize,
    column: usize,
    write: bool,
    settings: &SettingsStore,
) -> Result<()> {
    use inline_date_picker::host::Editor;

    let mut view = open_view(args)?;
    view.set_cursor(Position::new(
        line.saturating_sub(1),
        column.saturating_sub(1),
    ));

    let format = settings.date_format();
    let today = chrono::Local::now().date_naive();
    let outcome = if link {
        commands::insert_todays_date_link(&mut view, &format, today)
    } else {
        commands::insert_todays_date(&mut view, &format, today)
    };
    tracing::info!("{:?}", outcome);

    emit(&view, args, write)
}

fn open(args: &ViewArgs, cursor: usize, settings: &mut SettingsStore) -> Result<()> {
    let mut view = open_view(args)?;
    view.set_cursor_offset(cursor);

    let plugin = DatePickerViewPlugin::new(&view, settings);
    let mut layer = PickerLayer::new();
    layer.sync(&plugin.decorations(), HeadlessDateInput::default);

    match commands::open_date_picker(&view, Some(&plugin), &mut layer) {
        CommandOutcome::PickerOpened { from, to } => {
            println!("Opened date picker for {}..{}", from, to);
        }
        CommandOutcome::Notice(notice) => eprintln!("{}", notice.0),
        CommandOutcome::Inserted(_) => {}
    }
    Ok(())
}

fn config(action: ConfigAction, settings: &mut SettingsStore) -> Result<()> {
    match action {
        ConfigAction::Show => {
            if let Some(path) = config_paths::settings_file() {
                println!("# {}", path.display());
            }
            println!("{}", serde_json::to_string_pretty(settings.settings())?);
        }
        ConfigAction::SetFormat { format } => {
            settings.set_date_format(&format);
            settings
                .settings()
                .save()
                .context("Failed to save settings")?;
            let example = settings
                .date_format()
                .format(chrono::Local::now().date_naive());
            println!("Date format set to {} (today: {})", format, example);
        }
    }
    Ok(())
}
