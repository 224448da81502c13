use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::render::chart::{analysis_charts, Chart};
use crate::report::results_file::save_results;
use crate::report::summary::{additional_analysis, book_information, statistical_analysis};
use crate::report::DATASET_URL;
use crate::state::session::AnalysisSession;
use crate::state::settings::Settings;

/// Something that can show the analysis charts and export them.
pub trait ChartPresenter {
    /// Show `charts`. Returns the paths of any PNGs written.
    fn present(&mut self, charts: Vec<Chart>, settings: &Settings) -> Result<Vec<PathBuf>, String>;
}

/// The interactive menu, generic over its input, output and chart window
/// so a session can be scripted.
pub struct Menu<R, W, P> {
    input: R,
    out: W,
    presenter: P,
    settings: Settings,
}

enum Flow {
    Continue,
    Quit,
}

impl<R: BufRead, W: Write, P: ChartPresenter> Menu<R, W, P> {
    pub fn new(input: R, out: W, presenter: P, settings: Settings) -> Self {
        Self {
            input,
            out,
            presenter,
            settings,
        }
    }

    pub fn into_parts(self) -> (W, P) {
        (self.out, self.presenter)
    }

    /// Run the main menu until the user quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "This program performs analysis on a dataset of books")?;
        writeln!(
            self.out,
            "The dataset is called 7kBooks and the original version can be found at the following location:"
        )?;
        writeln!(self.out, "{DATASET_URL}")?;
        writeln!(self.out)?;
        writeln!(self.out, "***Welcome to the 7kBooks Analysis Program***")?;
        writeln!(self.out, "=============================================")?;

        loop {
            self.main_menu()?;
            let Some(choice) = self.read_choice()? else {
                self.quit_message()?;
                return Ok(());
            };
            match choice.as_str() {
                "q" => {
                    self.quit_message()?;
                    return Ok(());
                }
                "h" => self.help_section()?,
                "a" => {
                    if let Flow::Quit = self.analysis()? {
                        self.quit_message()?;
                        return Ok(());
                    }
                }
                _ => self.main_menu_error()?,
            }
        }
    }

    /// Prompt and read one selection, lowercased. `None` at end of input.
    fn read_choice(&mut self) -> io::Result<Option<String>> {
        write!(self.out, "Enter your selection: ")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_lowercase()))
    }

    fn analysis(&mut self) -> io::Result<Flow> {
        writeln!(self.out)?;
        writeln!(self.out, "Initializing data for analysis...please wait...")?;
        let session = match AnalysisSession::load(&self.settings) {
            Ok(session) => session,
            Err(e) => {
                if e.is_file_access() {
                    warn!("Cannot open {}: {e}", self.settings.data_path.display());
                } else {
                    error!("Failed to parse {}: {e}", self.settings.data_path.display());
                }
                writeln!(self.out)?;
                writeln!(self.out, "{}", e.user_message())?;
                return Ok(Flow::Continue);
            }
        };
        info!("Analysis session started with {} books", session.dataset.row_count());

        loop {
            writeln!(self.out)?;
            writeln!(self.out, "***ANALYSIS SECTION***")?;
            writeln!(self.out, "======================")?;
            self.analysis_menu()?;
            let Some(choice) = self.read_choice()? else {
                return Ok(Flow::Quit);
            };
            writeln!(self.out)?;
            match choice.as_str() {
                "b" => write!(self.out, "{}", book_information(&session))?,
                "s" => write!(self.out, "{}", statistical_analysis(&session))?,
                "a" => write!(
                    self.out,
                    "{}",
                    additional_analysis(&session, self.settings.top_n)
                )?,
                "v" => self.visualizations(&session)?,
                "f" => self.save_to_file(&session)?,
                "m" => {
                    writeln!(self.out, "Returning to main menu...")?;
                    writeln!(self.out)?;
                    writeln!(self.out, "***MAIN MENU***")?;
                    writeln!(self.out, "===============")?;
                    return Ok(Flow::Continue);
                }
                _ => self.analysis_menu_error()?,
            }
        }
    }

    fn visualizations(&mut self, session: &AnalysisSession) -> io::Result<()> {
        writeln!(self.out, "Visualizations:")?;
        writeln!(self.out, "---------------")?;
        writeln!(self.out)?;
        writeln!(self.out, "***LOADING VISUALIZATIONS...***")?;
        writeln!(self.out, "- Close the chart window to return to the menu")?;
        if self.settings.export_charts {
            writeln!(
                self.out,
                "- The visualizations are also saved as .png files in {}",
                self.settings.chart_dir.display()
            )?;
        }
        self.out.flush()?;

        let charts = analysis_charts(session, self.settings.top_n);
        match self.presenter.present(charts, &self.settings) {
            Ok(saved) => {
                for path in &saved {
                    writeln!(self.out, "   - saved {}", path.display())?;
                }
            }
            Err(e) => {
                error!("Chart window failed: {e}");
                writeln!(self.out)?;
                writeln!(self.out, "ERROR: {e}")?;
            }
        }
        Ok(())
    }

    fn save_to_file(&mut self, session: &AnalysisSession) -> io::Result<()> {
        let path = self.settings.results_path.clone();
        writeln!(self.out, "***PRINTING RESULTS...***")?;
        writeln!(self.out)?;
        writeln!(
            self.out,
            "Results can be found in the \"{}\" file",
            path.display()
        )?;
        writeln!(self.out)?;
        if let Err(e) = save_results(&path, session) {
            error!("Failed to write results: {e}");
            writeln!(self.out)?;
            writeln!(self.out, "{}", e.user_message())?;
        }
        Ok(())
    }

    fn main_menu(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Menu Options:")?;
        writeln!(self.out, "-------------")?;
        writeln!(self.out, "Enter \"A\" for analysis")?;
        writeln!(self.out, "Enter \"H\" for help")?;
        writeln!(self.out, "Enter \"Q\" to quit")
    }

    fn main_menu_error(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "ERROR: Invalid selection. Please enter one of the following options only:"
        )?;
        writeln!(self.out)?;
        writeln!(self.out, "\"A\" - for analysis of book data")?;
        writeln!(self.out, "\"H\" - for help and information")?;
        writeln!(self.out, "\"Q\" - to quit")
    }

    fn analysis_menu(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Menu Options:")?;
        writeln!(self.out, "-------------")?;
        writeln!(self.out, "Enter \"B\" for book page information")?;
        writeln!(self.out, "Enter \"S\" for statistical analysis")?;
        writeln!(self.out, "Enter \"A\" for additional analysis")?;
        writeln!(self.out, "Enter \"V\" for visualizations")?;
        writeln!(self.out, "Enter \"F\" to save results to a file")?;
        writeln!(self.out, "Enter \"M\" to return to main menu")
    }

    fn analysis_menu_error(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "ERROR: Invalid selection. Please enter one of the following options only:"
        )?;
        writeln!(self.out)?;
        writeln!(self.out, "\"B\" - for book information")?;
        writeln!(self.out, "\"S\" - for statistical analysis")?;
        writeln!(self.out, "\"A\" - for additional analysis")?;
        writeln!(self.out, "\"V\" - for visualizations")?;
        writeln!(self.out, "\"F\" - to save results to a file")?;
        writeln!(self.out, "\"M\" - to return to the main menu")?;
        writeln!(self.out)
    }

    fn quit_message(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Closing application, goodbye!")?;
        self.out.flush()
    }

    fn help_section(&mut self) -> io::Result<()> {
        let top_n = self.settings.top_n;
        let text = format!(
            "
***HELP SECTION***
==================
This program analyses a file containing almost 7000 books taken from the following dataset on kaggle:

{DATASET_URL}

If you enter \"A\" on the main menu, a list of analysis options will be displayed.

These options include the following:

1. Book Information
   - Details of the number of books and pages on file
   - Details of the number of book reviews in the file
   - Details of the years books in the file were published

2. Statistical Analysis
   - The mean, mode, median and standard deviation of book page numbers
   - The mean, mode, median and standard deviation of average reviews
   - The mean, mode, median and standard deviation of number of reviews
   - Correlation information for page numbers and average rating

3. Additional Analysis
   - Title information on the longest book
   - Title information on the shortest book
   - List of books with the same number of pages as the mean
   - List of top {top_n} longest books on file

4. Visualizations
   - Various visualizations showing results of analysis
   - Output includes bar charts, pie charts and scatter plots

5. Save to File
   - The option to save output to a text file
"
        );
        write!(self.out, "{text}")
    }
}
