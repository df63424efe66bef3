//! FloorCAD 命令行驱动程序
//!
//! 生成一个示例厨房：房间边界、门窗和橱柜电器，
//! 然后输出并导出工程量清单。
//!
//! 用法: `floorcad [项目名称] [输出目录] [模板文件]`

use std::path::PathBuf;

use anyhow::Result;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use floorcad_core::boq::BoqWorkingCopy;
use floorcad_core::entity::{ApplianceType, CabinetType, FixtureKind};
use floorcad_core::math::Point2;
use floorcad_core::template::{FixtureTemplate, PendingTemplate, Template};
use floorcad_file::{write_boq, Document, TemplateStore};
use floorcad_ui::{ActionType, Editor, EditorEvent, MouseButton, RoomInput};

/// 示例目录：放置点与对应模板
fn kitchen_catalog() -> Vec<(Point2, Template)> {
    let base = FixtureTemplate::new(FixtureKind::Cabinet(CabinetType::Base), 60.0, 85.0, 60.0)
        .with_price(320.0);
    let upper = FixtureTemplate::new(FixtureKind::Cabinet(CabinetType::Wall), 60.0, 70.0, 35.0)
        .with_price(210.0);
    let sink = FixtureTemplate::new(FixtureKind::Appliance(ApplianceType::Sink), 80.0, 85.0, 60.0)
        .with_price(450.0);
    let fridge = FixtureTemplate::new(
        FixtureKind::Appliance(ApplianceType::Refrigerator),
        70.0,
        180.0,
        65.0,
    )
    .with_price(1200.0);

    vec![
        (Point2::new(-90.0, 185.0), Template::Cabinet(base.clone())),
        (Point2::new(-30.0, 185.0), Template::Cabinet(base)),
        (Point2::new(-90.0, 170.0), Template::Cabinet(upper)),
        (Point2::new(40.0, 185.0), Template::Appliance(sink)),
        (Point2::new(135.0, 120.0), Template::Appliance(fridge)),
    ]
}

fn main() -> Result<()> {
    // 初始化日志
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_max_level(Level::INFO).finish(),
    )?;

    let mut args = std::env::args().skip(1);
    let project = args.next().unwrap_or_else(|| "Demo Kitchen".to_string());
    let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    let templates = match args.next() {
        Some(path) => TemplateStore::load(&PathBuf::from(path))?,
        None => TemplateStore::new(),
    };

    info!("Starting FloorCAD for project {:?}", project);

    let mut document = Document::with_title(project.clone());
    let mut editor = Editor::new();

    report(editor.create_room(&mut document, &RoomInput::default())?);

    editor.set_tool(ActionType::PlaceDoor);
    report(editor.click(&mut document, &templates, Point2::new(0.0, -190.0), MouseButton::Left));

    editor.set_tool(ActionType::PlaceWindow);
    report(editor.click(&mut document, &templates, Point2::new(-140.0, 0.0), MouseButton::Left));

    for (point, template) in kitchen_catalog() {
        let tool = match &template {
            Template::Appliance(_) => ActionType::PlaceAppliance,
            _ => ActionType::PlaceCabinet,
        };
        editor.set_tool(tool);
        let selected = PendingTemplate(template);
        report(editor.click(&mut document, &selected, point, MouseButton::Left));
    }
    editor.clear_tool();

    info!("Scene has {} entities", document.entity_count());

    let boq = document.generate_boq();
    for (category, items) in boq.categories() {
        println!("{category}");
        for item in items {
            println!(
                "  {:<32} {:<24} x{:<3} {:>10.2}",
                item.name,
                item.dimensions,
                item.quantity,
                item.total()
            );
        }
        println!("  {:<61} {:>10.2}", "subtotal", boq.category_total(category));
    }
    println!("Grand total: {:.2}", boq.grand_total());

    let copy = BoqWorkingCopy::from(&boq);
    let path = write_boq(&out_dir, &project, &copy)?;
    info!("BOQ exported to {}", path.display());

    Ok(())
}

fn report(event: EditorEvent) {
    match event {
        EditorEvent::Committed(n) => info!("Committed {} command(s)", n),
        EditorEvent::PlacementFailed(e) => warn!("Placement failed: {}", e),
        EditorEvent::Rejected(e) => warn!("Scene rejected command: {}", e),
        EditorEvent::Idle | EditorEvent::Cancelled => {}
    }
}
