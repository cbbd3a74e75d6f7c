use clap::Parser;
use epubforge::{BookConfig, Compression, Document, Result};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::path::{Path, PathBuf};

/// 📚 EpubForge - EPUB生成工具
#[derive(Parser)]
#[command(name = "epubforge")]
#[command(about = "一个根据YAML书籍文件生成EPUB的Rust工具")]
#[command(version)]
struct Args {
    /// 书籍文件路径
    #[arg(help = "描述书籍的YAML文件路径")]
    book_file: PathBuf,

    /// 输出目录
    #[arg(short, long, default_value = ".", help = "EPUB文件的输出目录")]
    output: PathBuf,

    /// 输出文件名
    #[arg(short, long, help = "不含扩展名的输出文件名（默认使用书名）")]
    name: Option<String>,

    /// 只列出文件
    #[arg(short, long, help = "列出将要打包的文件，不写入EPUB")]
    list: bool,

    /// 生成示例书籍文件
    #[arg(long, help = "在书籍文件路径处生成示例配置")]
    init: bool,

    /// 详细输出模式
    #[arg(short, long, help = "显示详细信息")]
    verbose: bool,
}

/// 输出到stderr的简单日志
struct StderrLogger {
    level: Level,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static DEBUG_LOGGER: StderrLogger = StderrLogger {
    level: Level::Debug,
};
static INFO_LOGGER: StderrLogger = StderrLogger { level: Level::Info };

fn init_logger(verbose: bool) {
    let (logger, filter) = if verbose {
        (&DEBUG_LOGGER, LevelFilter::Debug)
    } else {
        (&INFO_LOGGER, LevelFilter::Info)
    };

    if log::set_logger(logger).is_ok() {
        log::set_max_level(filter);
    }
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);

    println!("📚 EpubForge - EPUB生成工具");

    if args.verbose {
        println!("🔍 详细模式已启用");
    }

    let result = if args.init {
        init_book_file(&args.book_file)
    } else {
        build_book(&args)
    };

    match result {
        Ok(_) => println!("🎉 处理完成！"),
        Err(e) => {
            eprintln!("❌ 错误: {}", e);
            std::process::exit(1);
        }
    }
}

/// 生成示例书籍文件
fn init_book_file(path: &Path) -> Result<()> {
    if path.exists() {
        println!("⚠️  文件已存在，未覆盖: {}", path.display());
        return Ok(());
    }

    BookConfig::generate_default(path)?;
    println!("📝 已生成示例书籍文件: {}", path.display());
    Ok(())
}

/// 根据书籍文件生成EPUB
fn build_book(args: &Args) -> Result<()> {
    println!("正在读取书籍文件: {}", args.book_file.display());

    let config = BookConfig::from_file(&args.book_file)?;
    let base_dir = args
        .book_file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let document = config.into_document(&base_dir)?;

    display_summary(&document, args.verbose);

    if args.list {
        display_files(&document);
        return Ok(());
    }

    let path = document.create_epub(&args.output, args.name.as_deref())?;
    println!("\n💾 已写入: {}", path.display());
    Ok(())
}

/// 显示书籍概要
fn display_summary(document: &Document, verbose: bool) {
    let metadata = document.metadata();

    println!("\n📖 书籍信息:");
    println!("  标题: {}", metadata.title);
    println!("  作者: {}", metadata.author);
    println!("  语言: {}", metadata.language);
    println!("  章节: {} 个", document.section_count());
    println!("  图片: {} 个（不含封面）", document.images().len());

    if verbose {
        println!("\n📚 章节列表:");
        for (i, section) in document.sections().iter().enumerate() {
            let mut line = format!("  {}. {} -> {}", i + 1, section.title, section.filename);
            if section.is_front_matter {
                line.push_str(" [前置内容]");
            }
            if section.exclude_from_contents {
                line.push_str(" [不在目录中]");
            }
            println!("{}", line);
        }
    }
}

/// 列出将要打包的文件
fn display_files(document: &Document) {
    let files = document.files_for_epub();

    println!("\n📁 EPUB文件内容:");
    for (i, file) in files.iter().enumerate() {
        let method = match file.compression {
            Compression::Stored => "不压缩".to_string(),
            Compression::Deflated { level } => format!("压缩级别 {}", level),
        };
        println!("  {}. {} ({})", i + 1, file.path(), method);
    }
    println!("  共 {} 个文件", files.len());
}
