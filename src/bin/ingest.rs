//! Streams a bzip2-compressed MediaWiki XML dump into a `minidex`
//! index. Thin CLI wrapper: all indexing semantics live in the
//! library; this binary only knows how to turn a `.xml.bz2` dump into
//! `(id, title, body)` triples and drive the batching/resume loop.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

use bzip2::read::BzDecoder;
use clap::Parser;
use quick_xml::events::Event;
use quick_xml::Reader;

use minidex::core::types::Pair;
use minidex::{Config, Indexer, Store};

const BATCH_SIZE: usize = 300;

#[derive(Parser, Debug)]
#[command(about = "Index a MediaWiki XML dump into a minidex store")]
struct Args {
    /// Path to the MediaWiki xml.bz2 dump. The index is created next to
    /// it at `<filename>.idx`.
    #[arg(long)]
    filename: PathBuf,

    /// Also index each page's full text, not just its title.
    #[arg(long)]
    full_text: bool,

    /// Per-token posting-list cap applied when indexing bodies. 0 = uncapped.
    #[arg(long, default_value_t = 0)]
    max_ids: u32,

    /// Skip sled's background and post-commit flush for faster, less durable writes.
    #[arg(long)]
    no_sync: bool,
}

/// One page pulled off the dump: a non-redirect, main-namespace (`ns == 0`) page.
struct Page {
    id: u32,
    title: String,
    body: Option<String>,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> minidex::Result<()> {
    let index_path = {
        let mut p = args.filename.clone().into_os_string();
        p.push(".idx");
        PathBuf::from(p)
    };

    let config = Config {
        storage_path: index_path,
        no_sync: args.no_sync,
        max_ids: args.max_ids,
        open_timeout: Duration::from_secs(1),
    };
    let store = Store::open(&config)?;
    let indexer = Indexer::new(&store);

    let resume_from = store.last_id()?;
    if let Some(id) = resume_from {
        print!("\rSkipping to page with ID {id}...");
    }

    let file = File::open(&args.filename)?;
    let decoder = BzDecoder::new(BufReader::new(file));
    let mut reader = Reader::from_reader(BufReader::new(decoder));
    reader.trim_text(true);

    let mut title_batch = Vec::with_capacity(BATCH_SIZE);
    let mut body_batch = Vec::with_capacity(BATCH_SIZE);
    let mut skipped = resume_from.is_none();
    let mut pages_indexed: u64 = 0;
    let mut buf = Vec::new();
    let mut current: Option<PageBuilder> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) if e.name().as_ref() == b"page" => {
                current = Some(PageBuilder::default());
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"page" => {
                if let Some(page) = current.take().and_then(PageBuilder::finish) {
                    if !skipped {
                        if page.id != resume_from.unwrap_or(0) {
                            pages_indexed += 1;
                            continue;
                        }
                        skipped = true;
                    }

                    pages_indexed += 1;
                    if pages_indexed % 256 == 0 {
                        let prefix: String = page.title.chars().take(6).collect();
                        print!("\rIndexing page {pages_indexed} with ID {} (title prefix: {prefix})...", page.id);
                    }

                    title_batch.push(Pair::new(page.id, page.title));
                    if args.full_text {
                        if let Some(body) = page.body {
                            body_batch.push(Pair::new(page.id, body));
                        }
                    }

                    if title_batch.len() >= BATCH_SIZE {
                        indexer.index_batch(&title_batch, 0)?;
                        title_batch.clear();
                        indexer.index_batch(&body_batch, args.max_ids)?;
                        body_batch.clear();
                        store.set_last_id(page.id)?;
                    }
                }
            }
            Ok(event) => {
                if let Some(builder) = current.as_mut() {
                    builder.handle(event);
                }
            }
            Err(err) => return Err(minidex::Error::new(minidex::ErrorKind::Io, err.to_string())),
        }
        buf.clear();
    }

    indexer.index_batch(&title_batch, 0)?;
    indexer.index_batch(&body_batch, args.max_ids)?;
    store.update_statistics()?;

    println!("\rFinished! Indexed {pages_indexed} pages.");
    Ok(())
}

#[derive(Default)]
struct PageBuilder {
    in_title: bool,
    in_text: bool,
    in_ns: bool,
    in_redirect: bool,
    ns: String,
    id: Option<u32>,
    title: String,
    text: String,
    is_redirect: bool,
}

impl PageBuilder {
    fn handle(&mut self, event: Event) {
        match event {
            Event::Start(e) => match e.name().as_ref() {
                b"title" => self.in_title = true,
                b"text" => self.in_text = true,
                b"ns" => self.in_ns = true,
                _ => {}
            },
            Event::Empty(e) if e.name().as_ref() == b"redirect" => {
                self.is_redirect = true;
            }
            Event::End(e) => match e.name().as_ref() {
                b"title" => self.in_title = false,
                b"text" => self.in_text = false,
                b"ns" => self.in_ns = false,
                b"id" => {}
                _ => {}
            },
            Event::Text(e) => {
                let text = e.unescape().unwrap_or_default().into_owned();
                if self.in_title {
                    self.title.push_str(&text);
                } else if self.in_text {
                    self.text.push_str(&text);
                } else if self.in_ns {
                    self.ns.push_str(&text);
                } else if self.id.is_none() {
                    if let Ok(id) = text.trim().parse() {
                        self.id = Some(id);
                    }
                }
            }
            _ => {}
        }
    }

    fn finish(self) -> Option<Page> {
        let id = self.id?;
        if self.ns.trim() != "0" || self.is_redirect {
            return None;
        }
        Some(Page {
            id,
            title: self.title,
            body: if self.text.is_empty() { None } else { Some(self.text) },
        })
    }
}
