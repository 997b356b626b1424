use crate::terminal::{Reply, Terminal};
use crate::views;
use foodstall_core::{CoreError, Money};
use foodstall_order::OrderingService;
use std::io::{self, BufRead, Write};

/// Interactive front end. All input parsing and re-prompting happens here;
/// the service only ever sees parsed ids, quantities and amounts.
pub struct Shell<R, W> {
    service: OrderingService,
    terminal: Terminal<R, W>,
    currency: String,
}

/// Whether the operator is still at the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(service: OrderingService, terminal: Terminal<R, W>, currency: impl Into<String>) -> Self {
        Self {
            service,
            terminal,
            currency: currency.into(),
        }
    }

    pub fn service(&self) -> &OrderingService {
        &self.service
    }

    pub fn into_parts(self) -> (OrderingService, W) {
        (self.service, self.terminal.into_output())
    }

    /// Main menu loop; returns when the operator exits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.terminal.say(views::main_menu())?;
            let choice = match self.terminal.ask_int("Enter choice: ")? {
                Reply::Value(choice) => choice,
                Reply::Invalid => {
                    self.terminal.say("Invalid input. Please enter a number.")?;
                    continue;
                }
                Reply::Closed => break,
            };

            let flow = match choice {
                1 => self.show_menu().map(|_| Flow::Continue)?,
                2 => self.take_order()?,
                3 => self.show_order().map(|_| Flow::Continue)?,
                4 => self.modify_order()?,
                5 => self.process_payment()?,
                6 => self.admin_panel()?,
                7 => break,
                _ => {
                    self.terminal.say("Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                break;
            }
        }

        self.terminal.say("Exiting. Goodbye!")
    }

    fn show_menu(&mut self) -> io::Result<()> {
        let table = views::menu_table(self.service.list_menu());
        self.terminal.say(table)
    }

    fn show_order(&mut self) -> io::Result<()> {
        let table = views::order_table(&self.service.view_order());
        self.terminal.say(table)
    }

    fn take_order(&mut self) -> io::Result<Flow> {
        self.terminal.say("\n--- Place Order ---")?;

        loop {
            self.show_menu()?;
            let id = match self.terminal.ask_int("Enter Item ID to order (0 to finish): ")? {
                Reply::Value(0) => return Ok(Flow::Continue),
                Reply::Value(id) => id,
                Reply::Invalid => {
                    self.terminal.say("Invalid input. Please enter a number for Item ID.")?;
                    continue;
                }
                Reply::Closed => return Ok(Flow::Exit),
            };

            let Some(name) = self.item_name(id) else {
                self.terminal.say("Invalid Item ID. Please choose from the menu.")?;
                continue;
            };

            let quantity = match self.terminal.ask_int(&format!("Enter Quantity for {}: ", name))? {
                Reply::Value(quantity) if quantity > 0 => quantity,
                Reply::Closed => return Ok(Flow::Exit),
                _ => {
                    self.terminal.say("Invalid quantity. Please try again.")?;
                    continue;
                }
            };

            let placed = self
                .service
                .place_line(id as u32, quantity)
                .map(|item| item.name.clone());
            match placed {
                Ok(name) => self.terminal.say(format!("{} x {} added to order.", quantity, name))?,
                Err(e) => self.report(&e)?,
            }
        }
    }

    fn modify_order(&mut self) -> io::Result<Flow> {
        if self.service.order().is_empty() {
            self.terminal.say("\nOrder is empty. Nothing to modify.")?;
            return Ok(Flow::Continue);
        }

        self.show_order()?;
        self.terminal.say("\n--- Modify Order ---")?;

        let id = match self.terminal.ask_int("Enter Item ID to remove (0 to cancel): ")? {
            Reply::Value(0) => return Ok(Flow::Continue),
            Reply::Value(id) => id,
            Reply::Invalid => {
                self.terminal.say("Invalid input. Please enter a number for Item ID.")?;
                return Ok(Flow::Continue);
            }
            Reply::Closed => return Ok(Flow::Exit),
        };

        let in_order = u32::try_from(id).is_ok_and(|id| self.service.order().has(id));
        if !in_order {
            self.terminal.say("Error: Item ID not found in your current order.")?;
            return Ok(Flow::Continue);
        }

        let quantity = match self.terminal.ask_int("Enter quantity to remove: ")? {
            Reply::Value(quantity) if quantity > 0 => quantity,
            Reply::Closed => return Ok(Flow::Exit),
            _ => {
                self.terminal.say("Invalid quantity.")?;
                return Ok(Flow::Continue);
            }
        };

        let name = self.item_name(id).unwrap_or_default();
        match self.service.modify_line(id as u32, quantity) {
            Ok(_) => self.terminal.say(format!("{} x {} successfully removed.", quantity, name))?,
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn process_payment(&mut self) -> io::Result<Flow> {
        if self.service.order().is_empty() {
            self.terminal.say("\nOrder is empty. Nothing to pay.")?;
            return Ok(Flow::Continue);
        }

        self.terminal.say("\n*** PROCESSING PAYMENT ***")?;
        self.show_order()?;
        let total = self.service.order().total();
        self.terminal.say(format!("\nTotal Due: {}{}", self.currency, total))?;

        let prompt = format!("Enter amount to pay: {}", self.currency);
        loop {
            let tendered = match self.terminal.ask_money(&prompt)? {
                Reply::Value(amount) => amount,
                Reply::Invalid => {
                    self.terminal.say("Insufficient amount or invalid input. Please try again.")?;
                    continue;
                }
                // Order stays open; nothing was paid
                Reply::Closed => return Ok(Flow::Exit),
            };

            match self.service.checkout(tendered) {
                Ok(receipt) => {
                    self.terminal.say(views::receipt(&receipt, &self.currency))?;
                    return Ok(Flow::Continue);
                }
                Err(CoreError::InsufficientPayment { .. }) => {
                    self.terminal.say("Insufficient amount or invalid input. Please try again.")?;
                }
                Err(e) => {
                    self.report(&e)?;
                    return Ok(Flow::Continue);
                }
            }
        }
    }

    fn admin_panel(&mut self) -> io::Result<Flow> {
        loop {
            self.terminal.say(views::admin_menu())?;
            let choice = match self.terminal.ask_int("Enter choice: ")? {
                Reply::Value(choice) => choice,
                Reply::Invalid => {
                    self.terminal.say("Invalid input. Please enter a number.")?;
                    continue;
                }
                Reply::Closed => return Ok(Flow::Exit),
            };

            let flow = match choice {
                1 => self.add_item()?,
                2 => self.update_price()?,
                3 => self.save_menu().map(|_| Flow::Continue)?,
                4 => {
                    self.terminal.say("Exiting Admin Panel.")?;
                    return Ok(Flow::Continue);
                }
                _ => {
                    self.terminal.say("Invalid choice.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }
    }

    fn add_item(&mut self) -> io::Result<Flow> {
        self.terminal.say("\n--- Admin: Add New Item ---")?;

        let Some(name) = self.terminal.ask("Enter Item Name: ")? else {
            return Ok(Flow::Exit);
        };
        if name.is_empty() {
            self.terminal.say("Item name cannot be empty. Item not added.")?;
            return Ok(Flow::Continue);
        }

        let price = match self.terminal.ask_money(&format!("Enter Price: {}", self.currency))? {
            Reply::Value(price) => price,
            Reply::Invalid => {
                self.terminal.say("Invalid price. Item not added.")?;
                return Ok(Flow::Continue);
            }
            Reply::Closed => return Ok(Flow::Exit),
        };

        match self.service.admin_add_item(&name, price) {
            Ok(id) => {
                let message = format!("Item added: ID {} - {} ({}{})", id, name, self.currency, price);
                self.terminal.say(message)?;
            }
            Err(CoreError::InvalidPrice(_)) => self.terminal.say("Invalid price. Item not added.")?,
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn update_price(&mut self) -> io::Result<Flow> {
        self.terminal.say("\n--- Admin: Update Price ---")?;
        self.show_menu()?;

        let id = match self.terminal.ask_int("Enter Item ID to update: ")? {
            Reply::Value(id) => id,
            Reply::Invalid => {
                self.terminal.say("Invalid ID input.")?;
                return Ok(Flow::Continue);
            }
            Reply::Closed => return Ok(Flow::Exit),
        };

        let Some(current) = self.item_price(id) else {
            self.terminal.say(format!("Error: Item ID {} not found.", id))?;
            return Ok(Flow::Continue);
        };
        let name = self.item_name(id).unwrap_or_default();
        self.terminal
            .say(format!("Current Price for {}: {}{}", name, self.currency, current))?;

        let price = match self.terminal.ask_money(&format!("Enter NEW Price: {}", self.currency))? {
            Reply::Value(price) => price,
            Reply::Invalid => {
                self.terminal.say("Invalid price. Price update cancelled.")?;
                return Ok(Flow::Continue);
            }
            Reply::Closed => return Ok(Flow::Exit),
        };

        match self.service.admin_update_price(id as u32, price) {
            Ok(_) => {
                let message = format!("Price for ID {} updated to {}{}", id, self.currency, price);
                self.terminal.say(message)?;
            }
            Err(CoreError::InvalidPrice(_)) => {
                self.terminal.say("Invalid price. Price update cancelled.")?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn save_menu(&mut self) -> io::Result<()> {
        match self.service.admin_save() {
            Ok(()) => {
                let message = format!(
                    "\n--- Admin Action: Menu saved successfully to {}.",
                    self.service.menu_location()
                );
                self.terminal.say(message)
            }
            Err(e) => {
                tracing::error!("Menu save failed: {}", e);
                self.report(&e)
            }
        }
    }

    fn report(&mut self, error: &CoreError) -> io::Result<()> {
        self.terminal.say(format!("Error: {}", error))
    }

    fn item_name(&self, id: i64) -> Option<String> {
        let id = u32::try_from(id).ok()?;
        self.service.catalog().lookup(id).map(|item| item.name.clone())
    }

    fn item_price(&self, id: i64) -> Option<Money> {
        let id = u32::try_from(id).ok()?;
        self.service.catalog().lookup(id).map(|item| item.price)
    }
}
